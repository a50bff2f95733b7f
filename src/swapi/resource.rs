//! Upstream resource records.
//!
//! Field documentation follows <https://swapi.dev/documentation>. Everything
//! except `name` and `created` is optional on the wire: mirrors of the
//! catalog are not consistent about which descriptive fields they carry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// The upstream collections this service re-exposes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResourceKind {
    People,
    Planets,
}

impl ResourceKind {
    /// Path segment of the collection, relative to the upstream base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::People  => "people",
            Self::Planets => "planets",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A record served by one of the upstream collections.
///
/// The sort engine only ever needs these two accessors, so every variant
/// exposes them uniformly.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn name(&self) -> &str;
    fn created(&self) -> DateTime<Utc>;
}

/// A person within the Star Wars universe.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Person {
    pub name: String,
    /// In-universe birth year, BBY or ABY (before / after the Battle of Yavin).
    #[serde(default)]
    pub birth_year: String,
    /// `"unknown"` if not known, `"n/a"` if the person has no eyes.
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub hair_color: Option<String>,
    /// Centimeters.
    #[serde(default)]
    pub height: String,
    /// Kilograms.
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub skin_color: String,
    /// URL of the planet this person was born on or inhabits.
    #[serde(default)]
    pub homeworld: String,
    #[serde(default)]
    pub url: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub edited: Option<DateTime<Utc>>,
}

impl Resource for Person {
    const KIND: ResourceKind = ResourceKind::People;

    fn name(&self) -> &str { &self.name }
    fn created(&self) -> DateTime<Utc> { self.created }
}

/// A large mass, planet or planetoid in the Star Wars universe.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Planet {
    pub name: String,
    /// Kilometers.
    #[serde(default)]
    pub diameter: String,
    /// Hours for one rotation on its axis.
    #[serde(default)]
    pub rotation_period: String,
    /// Days for one orbit of its local star.
    #[serde(default)]
    pub orbital_period: String,
    /// `"1"` is one standard G.
    #[serde(default)]
    pub gravity: String,
    #[serde(default)]
    pub population: String,
    /// Comma separated if diverse.
    #[serde(default)]
    pub climate: String,
    /// Comma separated if diverse.
    #[serde(default)]
    pub terrain: String,
    /// Percentage of the surface covered by water.
    #[serde(default)]
    pub surface_water: String,
    #[serde(default)]
    pub url: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub edited: Option<DateTime<Utc>>,
}

impl Resource for Planet {
    const KIND: ResourceKind = ResourceKind::Planets;

    fn name(&self) -> &str { &self.name }
    fn created(&self) -> DateTime<Utc> { self.created }
}
