//! Request parameter validation.
//!
//! Turns the raw query of a listing request into [`RequestParams`] or a
//! [`ParamError`]. Pure parsing: nothing here touches the network, so a bad
//! request never costs an upstream call.

use thiserror::Error;

use crate::request::Request;
use crate::sort::{SortCriteria, SortField, SortOrder};

pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const SEARCH_KEY: &str = "search";
pub const SORT_FIELD_KEY: &str = "sortField";
pub const SORT_ORDER_KEY: &str = "sortOrder";

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// A client input the service refuses to act on.
///
/// The display strings are the messages sent back to the caller.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParamError {
    #[error("The page must be a number greater than 0.")]
    InvalidPage,

    #[error("The page size must be a number greater than 0.")]
    InvalidPageSize,

    #[error("The sort criteria is invalid.")]
    InvalidSortCriteria,
}

impl ParamError {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidPage         => "INVALID_PAGE",
            Self::InvalidPageSize     => "INVALID_PAGE_SIZE",
            Self::InvalidSortCriteria => "INVALID_SORT_CRITERIA",
        }
    }
}

/// Validated parameters of one listing request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestParams {
    /// 1-based caller page.
    pub page: u64,
    /// Records per caller page, at least 1.
    pub page_size: u64,
    /// Lower-cased substring filter on names; empty means no filter.
    pub search: String,
    pub sort: Option<SortCriteria>,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort: None,
        }
    }
}

impl RequestParams {
    /// Reads `page`, `pageSize`, `search`, `sortField` and `sortOrder` from
    /// the request query.
    pub fn from_request(req: &Request) -> Result<Self, ParamError> {
        Self::parse(
            req.query(PAGE_KEY),
            req.query(PAGE_SIZE_KEY),
            req.query(SEARCH_KEY),
            req.query(SORT_FIELD_KEY),
            req.query(SORT_ORDER_KEY),
        )
    }

    /// Validates raw values; `None` means the key was absent.
    ///
    /// A key that is present but empty is not the same as an absent one for
    /// the numeric values: `page=` is rejected rather than defaulted.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        search: Option<&str>,
        sort_field: Option<&str>,
        sort_order: Option<&str>,
    ) -> Result<Self, ParamError> {
        let page = positive(page, DEFAULT_PAGE).ok_or(ParamError::InvalidPage)?;
        let page_size = positive(page_size, DEFAULT_PAGE_SIZE).ok_or(ParamError::InvalidPageSize)?;
        let search = search.unwrap_or_default().to_lowercase();
        let sort = sort_criteria(sort_field, sort_order)?;

        Ok(Self { page, page_size, search, sort })
    }
}

fn positive(raw: Option<&str>, default: u64) -> Option<u64> {
    match raw {
        None => Some(default),
        Some(raw) => raw.parse::<u64>().ok().filter(|&n| n >= 1),
    }
}

/// No criteria at all when the field is absent or empty, whatever the order
/// says. With a field, an absent or empty order means ascending.
fn sort_criteria(
    field: Option<&str>,
    order: Option<&str>,
) -> Result<Option<SortCriteria>, ParamError> {
    let field = match field {
        None | Some("") => return Ok(None),
        Some(field) => field
            .parse::<SortField>()
            .map_err(|_| ParamError::InvalidSortCriteria)?,
    };

    let order = match order {
        None | Some("") => SortOrder::Asc,
        Some(order) => order
            .parse::<SortOrder>()
            .map_err(|()| ParamError::InvalidSortCriteria)?,
    };

    Ok(Some(SortCriteria { field, order }))
}
