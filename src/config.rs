//! Command-line options and the settings derived from them.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use reqwest::Url;

use crate::model::SwarmConfiguration;

/// Default backend address.
pub const DEFAULT_URL: &str = "http://localhost:8089/";

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading a file or creating a directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The metadata file is not valid JSON for a swarm configuration.
    #[error("invalid metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend URL could not be parsed.
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// A global tracing subscriber was already installed.
    #[error("could not install logger: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Command-line interface.
#[derive(Debug, Clone, Parser)]
#[command(name = "swarmctl", version, about)]
pub struct Cli {
    /// Base URL of the load-test backend.
    #[arg(long, env = "SWARMCTL_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// JSON file with the backend's swarm metadata.
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Directory for log files. Defaults to the XDG data directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filter used when `SWARMCTL_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend base URL; always ends in `/`.
    pub base_url: Url,
    /// Directory receiving log files.
    pub log_dir: PathBuf,
    /// Fallback log filter.
    pub log_level: String,
    /// Initial shared swarm state.
    pub swarm: SwarmConfiguration,
}

impl Settings {
    /// Builds settings from parsed command-line options.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&cli.url)?;
        let log_dir = match cli.log_dir {
            Some(dir) => dir,
            None => default_log_dir()?,
        };
        let swarm = match cli.metadata {
            Some(path) => load_metadata(&path)?,
            None => SwarmConfiguration::default(),
        };
        Ok(Self {
            base_url,
            log_dir,
            log_level: cli.log_level,
            swarm,
        })
    }
}

/// Parses `raw`, appending a trailing `/` so endpoints join beneath it.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".into()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Reads a swarm configuration from a JSON metadata file.
pub fn load_metadata(path: &Path) -> Result<SwarmConfiguration, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// `~/.local/share/swarmctl/logs/` or the platform equivalent.
fn default_log_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    Ok(data_dir.join("swarmctl").join("logs"))
}
