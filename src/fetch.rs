//! Collection fetcher.
//!
//! Two ways of reading a collection from a [`PageSource`]:
//!
//! - [`windowed`] stitches together just the upstream pages that overlap the
//!   caller's window.
//! - [`full`] walks every page through the upstream `next` links. Sorting
//!   needs the whole collection before it can cut a window.
//!
//! Fetches are strictly sequential: each one depends on the previous page's
//! `next` link or on the offset arithmetic.

use tracing::{debug, warn};

use crate::envelope::Listing;
use crate::error::{Error, FetchError};
use crate::pagination::Cursor;
use crate::params::RequestParams;
use crate::sort;
use crate::swapi::{Page, PageSource, Resource};

/// Answers one validated request: a sorted window of the full collection when
/// sort criteria are given, a windowed fetch otherwise.
pub async fn list<T, S>(source: &S, params: &RequestParams) -> Result<Listing<T>, Error>
where
    T: Resource,
    S: PageSource,
{
    let listing = match params.sort {
        Some(criteria) => {
            let all = full(source, &params.search).await?;
            debug!(fetched = all.data.len(), field = %criteria.field, order = %criteria.order, "sorting collection");
            sort::sort_and_window(all, criteria, params.page, params.page_size)
        }
        None => windowed(source, params.page, params.page_size, &params.search).await?,
    };
    Ok(listing)
}

/// Reads caller page `page` of size `page_size` by stitching upstream pages.
///
/// The returned count is the one the upstream reported on the first page,
/// i.e. the size of the whole (filtered) collection. A collection the
/// upstream reports as empty yields an empty listing with count 0.
pub async fn windowed<T, S>(
    source: &S,
    page: u64,
    page_size: u64,
    search: &str,
) -> Result<Listing<T>, FetchError>
where
    T: Resource,
    S: PageSource,
{
    let upstream_page_size = source.page_size();
    let cursor = Cursor::locate(page, page_size, upstream_page_size);

    let mut number = cursor.page;
    let mut offset = cursor.offset;
    let mut remaining = page_size;
    let mut reported: Option<u64> = None;
    let mut data = Vec::new();

    while remaining > 0 {
        let Page { count, next, results } = source.page::<T>(number, search).await?;
        if count == 0 {
            // Past the end, or nothing matches the search.
            match reported {
                None => return Ok(Listing::empty(0)),
                Some(_) => break,
            }
        }
        reported.get_or_insert(count);
        remaining = remaining.min(count);

        let len = results.len() as u64;
        let start = offset.min(len);
        let end = offset.saturating_add(remaining).min(upstream_page_size).min(len);
        let taken = end - start;

        // start <= end <= len, which came from a usize.
        data.extend(results.into_iter().skip(start as usize).take(taken as usize));
        remaining -= taken;

        debug!(upstream_page = number, taken, remaining, "stitched upstream page");

        if next.is_none() || len == 0 {
            break;
        }
        number += 1;
        offset = 0;
    }

    Ok(Listing { data, count: reported.unwrap_or(0) })
}

/// Reads the whole collection, following `next` links until the upstream
/// stops handing them out or the reported count is covered.
pub async fn full<T, S>(source: &S, search: &str) -> Result<Listing<T>, FetchError>
where
    T: Resource,
    S: PageSource,
{
    let Page { count, mut next, results } = source.page::<T>(1, search).await?;
    if count == 0 {
        return Ok(Listing::empty(0));
    }

    // The reported count bounds the walk, so a `next` cycle cannot run forever.
    let pages = count.div_ceil(source.page_size().max(1));
    let mut fetched = 1;

    let mut data = results;
    while let Some(link) = next.take() {
        if fetched >= pages {
            warn!(%link, pages, "upstream offers pages past its reported count, stopping");
            break;
        }
        let page = source.follow::<T>(&link).await?;
        fetched += 1;
        data.extend(page.results);
        next = page.next;
    }

    Ok(Listing { data, count })
}
