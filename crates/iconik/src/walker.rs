//! Recursive collection walk over a scrolled search.
//!
//! The walk opens a scroll, then follows `scroll_id` until the server returns
//! an empty page. It is bounded by [`WalkOptions::max_pages`] and stops with
//! [`Error::ScrollStalled`] when a page cannot advance the scroll: a
//! non-empty page without a cursor, or a page that repeats both the previous
//! cursor and the previous objects. A reused cursor alone is accepted since
//! servers may keep one cursor for the lifetime of a scroll.

use crate::backend::{Backend, Cursor};
use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::types::CatalogObject;
use std::ops::Range;

/// Default page size hint.
pub const DEFAULT_PER_PAGE: u32 = 150;

/// Default cap on non-empty pages.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Options for a collection walk.
///
/// # Example
///
/// ```
/// use iconik::WalkOptions;
///
/// let options = WalkOptions::new().per_page(500).max_pages(20);
/// assert_eq!(options.per_page, 500);
/// assert_eq!(options.max_pages, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Page size hint sent when opening the scroll.
    pub per_page: u32,
    /// Maximum number of non-empty pages before giving up.
    pub max_pages: usize,
}

impl WalkOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size hint.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the page cap.
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Progress reported after each non-empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkProgress {
    /// Non-empty pages received so far.
    pub pages: usize,
    /// Objects received so far.
    pub objects: usize,
    /// Total hits reported by the server on the first page, if any.
    pub total: Option<u64>,
}

/// Fetch every ACTIVE asset and collection below `collection_id`.
///
/// Returns the concatenation of all pages up to the first empty one.
///
/// # Errors
///
/// - `Error::SearchFailed` if the request opening the scroll is rejected.
/// - `Error::ScrollFailed` if any later request fails. Partial results are
///   discarded.
/// - `Error::ScrollStalled` / `Error::PageLimitExceeded` if the scroll does
///   not terminate.
pub fn walk_collection<B, F>(
    backend: &B,
    collection_id: &str,
    options: &WalkOptions,
    mut on_page: F,
) -> Result<Vec<CatalogObject>>
where
    B: Backend + ?Sized,
    F: FnMut(&WalkProgress),
{
    let query = SearchQuery::collection_descendants(collection_id);

    let mut page = backend
        .search(
            &query,
            &Cursor::Start {
                per_page: options.per_page,
            },
        )
        .map_err(|e| match e {
            Error::Http {
                status: Some(status),
                ..
            } => Error::SearchFailed { status },
            other => other,
        })?;

    let total = page.total;
    let mut objects: Vec<CatalogObject> = Vec::new();
    let mut previous: Option<(String, Range<usize>)> = None;
    let mut pages = 0;

    while !page.objects.is_empty() {
        pages += 1;
        if pages > options.max_pages {
            return Err(Error::PageLimitExceeded {
                limit: options.max_pages,
            });
        }

        let scroll_id = match page.scroll_id.take() {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(Error::ScrollStalled {
                    page: pages,
                    reason: "page has objects but no scroll_id".to_string(),
                });
            }
        };

        if let Some((prev_id, prev_range)) = &previous {
            if *prev_id == scroll_id && objects[prev_range.clone()] == page.objects[..] {
                return Err(Error::ScrollStalled {
                    page: pages,
                    reason: format!("scroll_id {} repeated the previous page", scroll_id),
                });
            }
        }

        log::debug!(
            "collection {}: page {} has {} objects",
            collection_id,
            pages,
            page.objects.len()
        );

        let start = objects.len();
        objects.append(&mut page.objects);
        on_page(&WalkProgress {
            pages,
            objects: objects.len(),
            total,
        });

        page = backend
            .search(&query, &Cursor::Continue(&scroll_id))
            .map_err(|e| Error::ScrollFailed {
                page: pages + 1,
                source: Box::new(e),
            })?;
        previous = Some((scroll_id, start..objects.len()));
    }

    log::debug!(
        "collection {}: walk finished after {} pages, {} objects",
        collection_id,
        pages,
        objects.len()
    );

    Ok(objects)
}
