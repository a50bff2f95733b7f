//! Mapping caller pages onto fixed-size upstream pages.
//!
//! A caller asks for page `p` of size `n`; the upstream only serves pages of
//! size `U`. The window starts at global offset `(p - 1) * n`, which lands on
//! upstream page `offset / U + 1` at intra-page position `offset % U`.
//!
//! ```text
//! caller  p=2 n=7       |-------|#######|
//! upstream U=5     |page 1|page 2|page 3|
//!                         ^ offset 2 of page 2
//! ```

/// Where a caller's window begins in upstream terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor {
    /// 1-based upstream page holding the first record of the window.
    pub page: u64,
    /// Index of that record within the upstream page.
    pub offset: u64,
}

impl Cursor {
    /// Locates the first record of caller page `page` (size `page_size`) in
    /// an upstream paged by `upstream_page_size`.
    ///
    /// All three must be at least 1; the request validator guarantees it for
    /// the caller values and the configuration for the upstream one. The
    /// arithmetic saturates, so an absurd page number points far past the end
    /// of any collection instead of wrapping around.
    pub fn locate(page: u64, page_size: u64, upstream_page_size: u64) -> Self {
        let already_requested = page.saturating_sub(1).saturating_mul(page_size);
        Self {
            page: (already_requested / upstream_page_size).saturating_add(1),
            offset: already_requested % upstream_page_size,
        }
    }
}

/// Index range `[min, max)` of caller page `page` within a materialized
/// sequence of `len` records, or `None` when the page starts past the end.
///
/// A page starting exactly at `len` yields an empty range rather than
/// `None`; both render as an empty page.
pub fn window(page: u64, page_size: u64, len: usize) -> Option<std::ops::Range<usize>> {
    let min = page.saturating_sub(1).saturating_mul(page_size);
    let len_u64 = len as u64;
    if min > len_u64 {
        return None;
    }
    let max = page.saturating_mul(page_size).min(len_u64);
    // Both bounds are <= len here, so they fit in usize.
    Some(min as usize..max as usize)
}
