//! Backend trait and implementations for the iconik API.
//!
//! [`http::HttpBackend`] talks to a real iconik host. [`MockBackend`] serves
//! canned pages from memory for tests:
//!
//! ```
//! use iconik::backend::{Backend, Cursor, MockBackend};
//! use iconik::{CatalogObject, SearchQuery};
//!
//! let mock = MockBackend::with_object_pages(vec![vec![CatalogObject::default()]]);
//! let query = SearchQuery::collection_descendants("c1");
//!
//! let first = mock.search(&query, &Cursor::Start { per_page: 150 }).unwrap();
//! assert_eq!(first.objects.len(), 1);
//!
//! let next = mock
//!     .search(&query, &Cursor::Continue(first.scroll_id.as_deref().unwrap()))
//!     .unwrap();
//! assert!(next.objects.is_empty());
//! ```

pub mod http;

use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::types::{CatalogObject, Credentials, SearchPage, Storage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Position in a scrolled search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor<'a> {
    /// Open a new scroll.
    Start {
        /// Page size hint.
        per_page: u32,
    },
    /// Continue an open scroll.
    Continue(&'a str),
}

/// Backend trait for the iconik API.
///
/// This abstraction lets the walker and the report run against a real host
/// or an in-memory fixture.
pub trait Backend: Send + Sync {
    /// Fetch one page of a scrolled search.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` carrying the status on a non-2xx response.
    fn search(&self, query: &SearchQuery, cursor: &Cursor<'_>) -> Result<SearchPage>;

    /// Fetch a storage by ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageLookup` on a non-2xx response.
    fn storage(&self, storage_id: &str) -> Result<Storage>;

    /// Exchange a username and password for an App ID and token.
    ///
    /// # Errors
    ///
    /// Returns `Error::AuthenticationFailed` with the server's error list
    /// on a non-2xx response.
    fn simple_login(&self, email: &str, password: &str) -> Result<Credentials>;
}

/// A scripted response for one search request.
#[derive(Debug, Clone)]
enum MockPage {
    Page(SearchPage),
    Status(u16),
}

#[derive(Debug, Default)]
struct MockState {
    pages: Vec<MockPage>,
    next: usize,
    repeat_last: bool,
    requests: Vec<Option<String>>,
    storages: HashMap<String, std::result::Result<Storage, u16>>,
    logins: HashMap<(String, String), Credentials>,
}

/// Mock backend for testing without network access.
///
/// Search responses are served in the order they were added, regardless of
/// the cursor passed in. Once the script is exhausted an empty page is
/// returned, unless [`MockBackend::repeat_last_page`] was requested.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that serves each batch as one page, with cursors
    /// `scroll-1`, `scroll-2`, ..., followed by an empty page.
    #[must_use]
    pub fn with_object_pages(pages: Vec<Vec<CatalogObject>>) -> Self {
        let mock = Self::new();
        for (i, objects) in pages.into_iter().enumerate() {
            mock.push_page(SearchPage::new(format!("scroll-{}", i + 1), objects));
        }
        mock.push_page(SearchPage::empty());
        mock
    }

    /// Append a page to the search script.
    pub fn push_page(&self, page: SearchPage) {
        self.state.lock().unwrap().pages.push(MockPage::Page(page));
    }

    /// Append a failing response to the search script.
    pub fn push_status(&self, status: u16) {
        self.state
            .lock()
            .unwrap()
            .pages
            .push(MockPage::Status(status));
    }

    /// Keep serving the last scripted page forever instead of ending.
    pub fn repeat_last_page(&self) {
        self.state.lock().unwrap().repeat_last = true;
    }

    /// Register a storage name.
    pub fn add_storage(&self, storage_id: impl Into<String>, name: impl Into<String>) {
        let storage_id = storage_id.into();
        let storage = Storage {
            id: Some(storage_id.clone()),
            name: name.into(),
        };
        self.state
            .lock()
            .unwrap()
            .storages
            .insert(storage_id, Ok(storage));
    }

    /// Make a storage lookup fail with the given status.
    pub fn fail_storage(&self, storage_id: impl Into<String>, status: u16) {
        self.state
            .lock()
            .unwrap()
            .storages
            .insert(storage_id.into(), Err(status));
    }

    /// Accept a username/password pair.
    pub fn add_login(&self, email: &str, password: &str, credentials: Credentials) {
        self.state
            .lock()
            .unwrap()
            .logins
            .insert((email.to_string(), password.to_string()), credentials);
    }

    /// Cursors received so far; `None` marks a request that opened a scroll.
    #[must_use]
    pub fn requests(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Backend for MockBackend {
    fn search(&self, _query: &SearchQuery, cursor: &Cursor<'_>) -> Result<SearchPage> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(match cursor {
            Cursor::Start { .. } => None,
            Cursor::Continue(id) => Some((*id).to_string()),
        });

        let index = if state.repeat_last && state.next >= state.pages.len() {
            state.pages.len().saturating_sub(1)
        } else {
            state.next
        };
        state.next += 1;

        match state.pages.get(index) {
            Some(MockPage::Page(page)) => Ok(page.clone()),
            Some(MockPage::Status(status)) => {
                Err(Error::http(format!("HTTP {}", status), Some(*status)))
            }
            None => Ok(SearchPage::empty()),
        }
    }

    fn storage(&self, storage_id: &str) -> Result<Storage> {
        let state = self.state.lock().unwrap();
        match state.storages.get(storage_id) {
            Some(Ok(storage)) => Ok(storage.clone()),
            Some(Err(status)) => Err(Error::StorageLookup {
                storage_id: storage_id.to_string(),
                status: *status,
            }),
            None => Err(Error::StorageLookup {
                storage_id: storage_id.to_string(),
                status: 404,
            }),
        }
    }

    fn simple_login(&self, email: &str, password: &str) -> Result<Credentials> {
        let state = self.state.lock().unwrap();
        state
            .logins
            .get(&(email.to_string(), password.to_string()))
            .cloned()
            .ok_or_else(|| Error::AuthenticationFailed {
                status: 401,
                errors: vec!["Invalid email or password".to_string()],
            })
    }
}
