use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use jobscout_api::ApiSettings;
use serde::Deserialize;

use super::logging::LogDestination;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "jobscout.ron";

/// Job Scout: find relevant jobs from multiple sources.
///
/// Picks a job-listing site offered by the scraping backend, optionally
/// filters by keyword, and shows the scraped listings.
#[derive(Parser, Debug, Default)]
#[command(name = "jobscout", version)]
pub struct Cli {
    /// Path to a RON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, env = "JOBSCOUT_BASE_URL")]
    pub base_url: Option<String>,

    /// Where log records are written
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            log: LogDestination::default(),
            log_file: PathBuf::from("./jobscout.log"),
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }
}

/// Builds the effective configuration: defaults, then the config file, then
/// command-line flags.
pub fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_file(default_path)?
            } else {
                AppConfig::default()
            }
        }
    };
    config.apply_overrides(cli);
    Ok(config)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let file = write_config(r#"(base_url: "http://scraper.local:8080", log: both)"#);
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };

        let config = load(&cli).expect("config");

        assert_eq!(config.base_url, "http://scraper.local:8080");
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(
            config.request_timeout_secs,
            AppConfig::default().request_timeout_secs
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let file = write_config(r#"(base_url: "http://from-file:1", log: terminal)"#);
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            base_url: Some("http://from-cli:2".to_string()),
            log: Some(LogDestination::Off),
            verbose: 0,
        };

        let config = load(&cli).expect("config");

        assert_eq!(config.base_url, "http://from-cli:2");
        assert_eq!(config.log, LogDestination::Off);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = Cli {
            config: Some(dir.path().join("absent.ron")),
            ..Cli::default()
        };

        assert!(matches!(load(&cli), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_config("(base_url: 42)");
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };

        assert!(matches!(load(&cli), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn api_settings_use_configured_timeouts() {
        let config = AppConfig {
            connect_timeout_secs: 3,
            request_timeout_secs: 9,
            ..AppConfig::default()
        };

        let settings = config.api_settings();

        assert_eq!(settings.connect_timeout, Duration::from_secs(3));
        assert_eq!(settings.request_timeout, Duration::from_secs(9));
    }
}
