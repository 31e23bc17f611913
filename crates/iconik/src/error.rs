//! Error types for iconik API operations.
//!
//! Errors are categorized so callers can give appropriate user feedback
//! (bad credentials vs. unreachable host vs. a misbehaving scroll cursor).

use std::fmt;

/// Result type alias for iconik operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of iconik errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport failures and unexpected HTTP statuses.
    Network,
    /// Rejected or missing credentials.
    Auth,
    /// Requested resource does not exist.
    NotFound,
    /// Response body could not be decoded.
    Format,
    /// The server broke the scroll protocol.
    Protocol,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Auth => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::Format => "Invalid API response",
            Self::Protocol => "Pagination protocol violation",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the iconik host URL and your connection",
            Self::Auth => "Verify the App ID and token, or log in with username and password",
            Self::NotFound => "Verify the collection or storage ID is correct",
            Self::Format => "The API returned an unexpected payload, check the host URL",
            Self::Protocol => "Try again with a smaller --per-page or a larger --max-pages",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to the iconik API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// Simple login was rejected.
    #[error("authentication failed with status {status}")]
    AuthenticationFailed {
        /// HTTP status code returned by the login endpoint.
        status: u16,
        /// Error messages reported by the server.
        errors: Vec<String>,
    },

    /// The first search request did not succeed.
    #[error("search failed with status {status}")]
    SearchFailed {
        /// HTTP status code returned by the search endpoint.
        status: u16,
    },

    /// A scroll request after the first page failed.
    #[error("scroll request for page {page} failed: {source}")]
    ScrollFailed {
        /// One-based page number that failed.
        page: usize,
        /// Underlying error.
        #[source]
        source: Box<Error>,
    },

    /// The server returned a page that cannot advance the scroll.
    #[error("scroll stalled at page {page}: {reason}")]
    ScrollStalled {
        /// One-based page number where the stall was detected.
        page: usize,
        /// What was wrong with the page.
        reason: String,
    },

    /// The walk did not reach an empty page within the configured limit.
    #[error("search did not finish within {limit} pages")]
    PageLimitExceeded {
        /// Configured maximum number of pages.
        limit: usize,
    },

    /// Storage lookup did not succeed.
    #[error("storage lookup for {storage_id} failed with status {status}")]
    StorageLookup {
        /// Storage being looked up.
        storage_id: String,
        /// HTTP status code.
        status: u16,
    },

    /// A request needing App ID and token was made without them.
    #[error("no App ID and token configured")]
    MissingCredentials,

    /// Invalid response from API.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => *status,
            Error::AuthenticationFailed { status, .. }
            | Error::SearchFailed { status }
            | Error::StorageLookup { status, .. } => Some(*status),
            Error::ScrollFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Http { status, .. } => match status {
                Some(401 | 403) => ErrorCategory::Auth,
                Some(404) => ErrorCategory::NotFound,
                _ => ErrorCategory::Network,
            },
            Error::AuthenticationFailed { .. } | Error::MissingCredentials => ErrorCategory::Auth,
            Error::SearchFailed { status } => match status {
                401 | 403 => ErrorCategory::Auth,
                404 => ErrorCategory::NotFound,
                _ => ErrorCategory::Network,
            },
            Error::ScrollFailed { source, .. } => source.category(),
            Error::ScrollStalled { .. } | Error::PageLimitExceeded { .. } => {
                ErrorCategory::Protocol
            }
            Error::StorageLookup { status, .. } => {
                if *status == 404 {
                    ErrorCategory::NotFound
                } else {
                    ErrorCategory::Network
                }
            }
            Error::InvalidResponse(_) => ErrorCategory::Format,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {}", code),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
