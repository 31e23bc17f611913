//! Where the App ID and token come from
//!
//! Either they were supplied (flags, environment, config file) or the user is
//! prompted for a username and password which are exchanged for them through
//! iconik's simple login.

use anyhow::{Context, Result, bail};
use dialoguer::{Input, Password};
use iconik::Credentials;
use iconik::backend::Backend;
use iconik::backend::http::HttpBackend;

use crate::config::Settings;
use crate::ui;

/// Supplies credentials for API requests.
pub trait CredentialProvider {
    fn credentials(&self) -> Result<Credentials>;
}

/// Build the provider matching the settings.
pub fn provider(settings: &Settings) -> Box<dyn CredentialProvider> {
    match &settings.credentials {
        Some(credentials) => Box::new(StaticCredentials(credentials.clone())),
        None => Box::new(InteractiveLogin::new(
            TerminalPrompter,
            Box::new(HttpBackend::new(settings.host.as_str())),
        )),
    }
}

// ============================================================================
// Static
// ============================================================================

/// Credentials supplied up front.
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// Interactive login
// ============================================================================

/// Asks the user for a username and password.
pub trait Prompter {
    fn username(&self) -> Result<String>;
    fn password(&self) -> Result<String>;
}

/// Prompts on the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn username(&self) -> Result<String> {
        let username: String = Input::new()
            .with_prompt("iconik username")
            .interact_text()
            .context("Could not read username")?;
        Ok(username)
    }

    fn password(&self) -> Result<String> {
        Password::new()
            .with_prompt("iconik password")
            .interact()
            .context("Could not read password")
    }
}

/// Exchanges a prompted username and password for credentials.
pub struct InteractiveLogin<P> {
    prompter: P,
    backend: Box<dyn Backend>,
}

impl<P: Prompter> InteractiveLogin<P> {
    pub fn new(prompter: P, backend: Box<dyn Backend>) -> Self {
        Self { prompter, backend }
    }
}

impl<P: Prompter> CredentialProvider for InteractiveLogin<P> {
    fn credentials(&self) -> Result<Credentials> {
        ui::info("No App ID or Token specified in CLI or config file, assuming standard auth");
        let username = self.prompter.username()?;
        let password = self.prompter.password()?;

        match self.backend.simple_login(&username, &password) {
            Ok(credentials) => {
                log::info!("Logged in as {}", username);
                Ok(credentials)
            }
            Err(iconik::Error::AuthenticationFailed { status, errors }) => {
                ui::error(&format!("Auth failed - status code {}", status));
                for error in &errors {
                    ui::dim(error);
                }
                bail!("Authentication failed for {}", username)
            }
            Err(e) => Err(e).context("Could not log in"),
        }
    }
}
