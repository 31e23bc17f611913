//! HTTP backend for a live iconik host.
//!
//! All calls are blocking and made without timeouts or retries. The agent is
//! configured not to turn non-2xx statuses into transport errors so each
//! endpoint can map statuses to its own error variant.

use crate::backend::{Backend, Cursor};
use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::types::{Credentials, SearchPage, Storage};
use serde::{Deserialize, Serialize};

/// Default iconik host.
pub const DEFAULT_HOST: &str = "https://app.iconik.io/";

/// App name sent with simple login requests.
const LOGIN_APP_NAME: &str = "WEB";

/// HTTP backend.
///
/// # Example
///
/// ```no_run
/// use iconik::backend::http::HttpBackend;
/// use iconik::backend::{Backend, Cursor};
/// use iconik::{Credentials, SearchQuery};
///
/// let backend = HttpBackend::new("https://app.iconik.io/")
///     .with_credentials(Credentials::new("app-id", "token"));
/// let query = SearchQuery::collection_descendants("collection-id");
/// let page = backend.search(&query, &Cursor::Start { per_page: 150 }).unwrap();
/// println!("First page has {} objects", page.objects.len());
/// ```
pub struct HttpBackend {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Host URL without trailing slash.
    host: String,
    /// App ID and token for signed requests.
    credentials: Option<Credentials>,
}

impl HttpBackend {
    /// Create a backend for `host` without credentials.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        let host: String = host.into();
        Self {
            agent: config.into(),
            host: host.trim_end_matches('/').to_string(),
            credentials: None,
        }
    }

    /// Attach credentials used for search and storage requests.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Get the host URL (without trailing slash).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    fn credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or(Error::MissingCredentials)
    }

    /// URL that opens a scroll. Note the trailing slash.
    fn search_url(&self) -> String {
        format!("{}/API/search/v1/search/", self.host)
    }

    /// URL that continues a scroll.
    fn scroll_url(&self) -> String {
        format!("{}/API/search/v1/search", self.host)
    }

    fn storage_url(&self, storage_id: &str) -> String {
        format!("{}/API/files/v1/storages/{}", self.host, storage_id)
    }

    fn login_url(&self) -> String {
        format!("{}/API/auth/v1/auth/simple/login/", self.host)
    }
}

impl Backend for HttpBackend {
    fn search(&self, query: &SearchQuery, cursor: &Cursor<'_>) -> Result<SearchPage> {
        let creds = self.credentials()?;

        let url = match cursor {
            Cursor::Start { .. } => self.search_url(),
            Cursor::Continue(_) => self.scroll_url(),
        };
        let mut request = self.agent.post(&url).query_pairs(search_params(cursor));
        for (name, value) in auth_headers(creds) {
            request = request.header(name, value);
        }

        let mut response = request
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .send_json(query)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(
                format!("search returned HTTP {}", status.as_u16()),
                Some(status.as_u16()),
            ));
        }

        Ok(response.body_mut().read_json()?)
    }

    fn storage(&self, storage_id: &str) -> Result<Storage> {
        let creds = self.credentials()?;

        let mut request = self.agent.get(&self.storage_url(storage_id));
        for (name, value) in auth_headers(creds) {
            request = request.header(name, value);
        }
        let mut response = request.header("accept", "application/json").call()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::StorageLookup {
                storage_id: storage_id.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.body_mut().read_json()?)
    }

    fn simple_login(&self, email: &str, password: &str) -> Result<Credentials> {
        let body = LoginRequest {
            app_name: LOGIN_APP_NAME,
            email,
            password,
        };

        let mut response = self
            .agent
            .post(&self.login_url())
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .send_json(&body)?;

        let status = response.status();
        if !status.is_success() {
            let errors = response
                .body_mut()
                .read_json::<LoginErrors>()
                .map(|e| e.errors)
                .unwrap_or_default();
            return Err(Error::AuthenticationFailed {
                status: status.as_u16(),
                errors,
            });
        }

        let login: LoginResponse = response.body_mut().read_json()?;
        Ok(Credentials::new(login.app_id, login.token))
    }
}

/// Query parameters for a search request. Opening a scroll sets the page
/// size; continuing one only names the cursor.
fn search_params(cursor: &Cursor<'_>) -> Vec<(&'static str, String)> {
    match cursor {
        Cursor::Start { per_page } => vec![
            ("per_page", per_page.to_string()),
            ("scroll", "true".to_string()),
            ("generate_signed_url", "false".to_string()),
            ("save_search_history", "false".to_string()),
        ],
        Cursor::Continue(scroll_id) => vec![
            ("scroll", "true".to_string()),
            ("scroll_id", (*scroll_id).to_string()),
        ],
    }
}

/// Headers that sign a request.
fn auth_headers(creds: &Credentials) -> [(&'static str, &str); 2] {
    [("App-ID", creds.app_id.as_str()), ("Auth-Token", creds.token.as_str())]
}

// =============================================================================
// Login payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    app_name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    app_id: String,
    token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginErrors {
    errors: Vec<String>,
}
