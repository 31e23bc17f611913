//! Config directory resolution
//!
//! # Environment Variables
//!
//! - `ICONIK_REPORT_CONFIG_DIR` - Override config directory
//!
//! # Path Resolution Priority
//!
//! 1. `ICONIK_REPORT_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/iconik-report` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\iconik-report`
//!    - macOS/Linux: `~/.config/iconik-report`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "ICONIK_REPORT_CONFIG_DIR";

/// Directory name under the platform config root
const APP_DIR: &str = "iconik-report";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    config_dir_from(
        std::env::var(ENV_CONFIG_DIR).ok().as_deref(),
        std::env::var("XDG_CONFIG_HOME").ok().as_deref(),
    )
}

/// Resolve the config directory from explicit override values.
fn config_dir_from(override_dir: Option<&str>, xdg_config_home: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        let path = expand(dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Some(xdg_config) = xdg_config_home.filter(|d| !d.is_empty()) {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join(APP_DIR);
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
