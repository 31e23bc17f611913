use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use iconik::{Credentials, DEFAULT_HOST, WalkOptions};

use crate::cli::Cli;
use crate::paths;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Config file
// ============================================================================

/// Optional settings read from `config.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub app_id: Option<String>,
    pub token: Option<String>,
    pub host: Option<String>,
    pub per_page: Option<u32>,
    pub max_pages: Option<usize>,
}

impl FileConfig {
    /// Load the config file from the config directory. A missing file yields
    /// an empty config.
    pub fn load() -> Result<Self> {
        let path = paths::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load a config file from `path`. A missing file yields an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

// ============================================================================
// Effective settings
// ============================================================================

/// Settings after merging CLI/env over the config file over defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub collection_id: String,
    pub host: String,
    pub credentials: Option<Credentials>,
    pub walk: WalkOptions,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let app_id = cli.app_id.clone().or(file.app_id);
        let token = cli.token.clone().or(file.token);
        let credentials = match (app_id, token) {
            (Some(app_id), Some(token)) => Some(Credentials::new(app_id, token)),
            _ => None,
        };

        let mut walk = WalkOptions::default();
        if let Some(per_page) = cli.per_page.or(file.per_page) {
            walk = walk.per_page(per_page);
        }
        if let Some(max_pages) = cli.max_pages.or(file.max_pages) {
            walk = walk.max_pages(max_pages);
        }

        Self {
            collection_id: cli.collection_id.clone(),
            host: cli
                .host
                .clone()
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            credentials,
            walk,
            output_dir: cli.output_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["collection-report"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
app_id = "file-app"
token = "file-token"
host = "https://eu.iconik.io/"
per_page = 500
"#
        )
        .unwrap();

        let config = FileConfig::load_from(file.path()).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("file-app"));
        assert_eq!(config.token.as_deref(), Some("file-token"));
        assert_eq!(config.host.as_deref(), Some("https://eu.iconik.io/"));
        assert_eq!(config.per_page, Some(500));
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "per_page = \"lots\"").unwrap();
        assert!(FileConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_unknown_key() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "colection_id = \"typo\"").unwrap();
        assert!(FileConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::resolve(&cli(&["-c", "c1"]), FileConfig::default());
        assert_eq!(settings.collection_id, "c1");
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.credentials, None);
        assert_eq!(settings.walk, WalkOptions::default());
        assert_eq!(settings.output_dir, None);
    }

    #[test]
    fn test_settings_cli_overrides_file() {
        let file = FileConfig {
            app_id: Some("file-app".to_string()),
            token: Some("file-token".to_string()),
            host: Some("https://file.example/".to_string()),
            per_page: Some(10),
            max_pages: Some(20),
        };
        let settings = Settings::resolve(
            &cli(&[
                "-c",
                "c1",
                "-a",
                "cli-app",
                "-i",
                "https://cli.example/",
                "--per-page",
                "50",
            ]),
            file,
        );

        assert_eq!(
            settings.credentials,
            Some(Credentials::new("cli-app", "file-token"))
        );
        assert_eq!(settings.host, "https://cli.example/");
        assert_eq!(settings.walk.per_page, 50);
        assert_eq!(settings.walk.max_pages, 20);
    }

    #[test]
    fn test_settings_partial_credentials() {
        let settings = Settings::resolve(&cli(&["-c", "c1", "-a", "app"]), FileConfig::default());
        assert_eq!(settings.credentials, None);
    }
}
