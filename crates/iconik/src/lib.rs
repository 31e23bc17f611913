//! # iconik
//!
//! Blocking client for the parts of the iconik media asset management API
//! needed to inventory a collection.
//!
//! This crate provides functionality for:
//! - Exchanging a username and password for an App ID and token
//!   ([`backend::Backend::simple_login`])
//! - Walking every asset and collection below a collection, following the
//!   search scroll cursor to the end
//! - Looking up storage display names
//!
//! ## Example
//!
//! ```no_run
//! use iconik::{Client, Credentials, WalkOptions};
//!
//! let client = Client::new("https://app.iconik.io/", Credentials::new("app-id", "token"));
//!
//! let objects = client
//!     .walk_collection("collection-id", &WalkOptions::default(), |_| {})
//!     .expect("walk failed");
//! println!("{} objects", objects.len());
//!
//! let name = client.storage_name("storage-id").expect("lookup failed");
//! println!("storage: {}", name);
//! ```
//!
//! ## Testing
//!
//! [`MockBackend`] serves scripted pages, storages and logins from memory.
//! Wrap it with [`Client::with_backend`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod query;
pub mod types;
pub mod walker;

pub use backend::MockBackend;
pub use backend::http::DEFAULT_HOST;
pub use error::{Error, ErrorCategory, Result};
pub use query::SearchQuery;
pub use types::{
    CatalogObject, Credentials, FileRecord, FormatRecord, MediaKind, ObjectKind, SearchPage,
    Storage,
};
pub use walker::{WalkOptions, WalkProgress};

use backend::Backend;
use backend::http::HttpBackend;

/// High-level client for iconik operations.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a client for `host` signing requests with `credentials`.
    #[must_use]
    pub fn new(host: &str, credentials: Credentials) -> Self {
        Self {
            backend: Box::new(HttpBackend::new(host).with_credentials(credentials)),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Fetch every ACTIVE asset and collection below `collection_id`.
    ///
    /// `on_page` is called after each non-empty page.
    pub fn walk_collection<F>(
        &self,
        collection_id: &str,
        options: &WalkOptions,
        on_page: F,
    ) -> Result<Vec<CatalogObject>>
    where
        F: FnMut(&WalkProgress),
    {
        walker::walk_collection(self.backend.as_ref(), collection_id, options, on_page)
    }

    /// Look up the display name of a storage.
    pub fn storage_name(&self, storage_id: &str) -> Result<String> {
        self.backend.storage(storage_id).map(|s| s.name)
    }
}
