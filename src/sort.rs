//! Sort engine: total ordering over a fully fetched collection, then the
//! caller's window.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::envelope::Listing;
use crate::error::Error;
use crate::pagination;
use crate::swapi::Resource;

/// Field a collection can be ordered by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    /// Lexical, case-sensitive, as the upstream spells it.
    Name,
    /// Chronological by creation timestamp.
    Created,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name    => "name",
            Self::Created => "created",
        }
    }
}

/// Parses `name` / `created`, ignoring ASCII case.
impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("name") {
            Ok(Self::Name)
        } else if s.eq_ignore_ascii_case("created") {
            Ok(Self::Created)
        } else {
            Err(Error::InvalidSortField(s.to_owned()))
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc  => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parses `asc` / `desc`, ignoring ASCII case.
impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortCriteria {
    pub field: SortField,
    pub order: SortOrder,
}

/// Sorts `records` in place.
///
/// The ascending sort is stable; descending is the ascending result
/// reversed, so records that compare equal come out in reverse upstream
/// order.
pub fn sort<T: Resource>(records: &mut [T], criteria: SortCriteria) {
    let ascending: fn(&T, &T) -> Ordering = match criteria.field {
        SortField::Name    => |a, b| a.name().cmp(b.name()),
        SortField::Created => |a, b| a.created().cmp(&b.created()),
    };
    records.sort_by(ascending);

    if criteria.order == SortOrder::Desc {
        records.reverse();
    }
}

/// Sorts the whole collection and cuts out caller page `page`.
///
/// The reported count is left untouched: it describes the collection, not
/// the window.
pub fn sort_and_window<T: Resource>(
    mut all: Listing<T>,
    criteria: SortCriteria,
    page: u64,
    page_size: u64,
) -> Listing<T> {
    sort(&mut all.data, criteria);

    match pagination::window(page, page_size, all.data.len()) {
        Some(range) => {
            all.data.truncate(range.end);
            all.data.drain(..range.start);
            all
        }
        None => Listing::empty(all.count),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::swapi::Planet;

    fn planet(name: &str, hour: u32) -> Planet {
        Planet {
            name: name.to_owned(),
            diameter: String::new(),
            rotation_period: String::new(),
            orbital_period: String::new(),
            gravity: String::new(),
            population: String::new(),
            climate: String::new(),
            terrain: String::new(),
            surface_water: String::new(),
            url: String::new(),
            created: Utc.with_ymd_and_hms(2014, 12, 9, hour, 0, 0).unwrap(),
            edited: None,
        }
    }

    fn names(records: &[Planet]) -> Vec<&str> {
        records.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Vec<Planet> {
        vec![
            planet("Hoth", 3),
            planet("Alderaan", 5),
            planet("Tatooine", 1),
            planet("bespin", 2),
            planet("Dagobah", 4),
        ]
    }

    const fn by(field: SortField, order: SortOrder) -> SortCriteria {
        SortCriteria { field, order }
    }

    #[test]
    fn sorts_by_name_case_sensitively() {
        let mut records = sample();
        sort(&mut records, by(SortField::Name, SortOrder::Asc));
        assert_eq!(names(&records), ["Alderaan", "Dagobah", "Hoth", "Tatooine", "bespin"]);
    }

    #[test]
    fn sorts_by_created() {
        let mut records = sample();
        sort(&mut records, by(SortField::Created, SortOrder::Asc));
        assert_eq!(names(&records), ["Tatooine", "bespin", "Hoth", "Dagobah", "Alderaan"]);
    }

    #[test]
    fn descending_is_ascending_reversed() {
        for field in [SortField::Name, SortField::Created] {
            let mut asc = sample();
            let mut desc = sample();
            sort(&mut asc, by(field, SortOrder::Asc));
            sort(&mut desc, by(field, SortOrder::Desc));

            desc.reverse();
            assert_eq!(asc, desc);
        }
    }

    #[test]
    fn ascending_sort_is_stable() {
        let mut records = vec![planet("Naboo", 1), planet("Naboo", 2), planet("Kamino", 3)];
        sort(&mut records, by(SortField::Name, SortOrder::Asc));

        assert_eq!(names(&records), ["Kamino", "Naboo", "Naboo"]);
        assert!(records[1].created < records[2].created);
    }

    #[test]
    fn consecutive_pages_partition_the_sorted_set() {
        let criteria = by(SortField::Name, SortOrder::Asc);
        let all = Listing { data: sample(), count: 5 };

        let first = sort_and_window(all.clone(), criteria, 1, 2);
        let second = sort_and_window(all.clone(), criteria, 2, 2);
        let third = sort_and_window(all, criteria, 3, 2);

        assert_eq!(names(&first.data), ["Alderaan", "Dagobah"]);
        assert_eq!(names(&second.data), ["Hoth", "Tatooine"]);
        assert_eq!(names(&third.data), ["bespin"]);
        assert!([first.count, second.count, third.count].iter().all(|&c| c == 5));
    }

    #[test]
    fn page_past_the_end_keeps_the_count() {
        let all = Listing { data: sample(), count: 5 };

        let out = sort_and_window(all, by(SortField::Created, SortOrder::Desc), 4, 2);
        assert!(out.data.is_empty());
        assert_eq!(out.count, 5);
    }

    #[test]
    fn parses_fields_and_orders_ignoring_case() {
        assert_eq!("NAME".parse::<SortField>().unwrap(), SortField::Name);
        assert_eq!("Created".parse::<SortField>().unwrap(), SortField::Created);
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!("sideways".parse::<SortOrder>(), Err(()));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = "height".parse::<SortField>().unwrap_err();
        assert!(matches!(err, Error::InvalidSortField(field) if field == "height"));
    }
}
