// ABOUTME: JSON settings file model and lookup for the scraper run.
// ABOUTME: Every key is optional; missing sections fall back to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::options::ClientBuilder;

/// Settings file names tried, in order, when no explicit path is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["config/settings.json", "config/settings.example.json"];

/// An export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Parse a format name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Seconds.
    pub timeout: f64,
    pub concurrency: usize,
    pub user_agent: String,
    pub max_retries: u32,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout: 15.0,
            concurrency: 5,
            user_agent: "CompanyScope/1.0".to_string(),
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    /// Raw names as written in the file; see [`OutputSettings::formats`].
    #[serde(rename = "formats")]
    pub format_names: Vec<String>,
    pub filename_prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            format_names: vec!["json".to_string()],
            filename_prefix: "zoominfo_companies".to_string(),
        }
    }
}

impl OutputSettings {
    /// Recognized formats, deduplicated; unknown names are logged and skipped.
    pub fn formats(&self) -> Vec<Format> {
        let mut formats = Vec::new();
        for name in &self.format_names {
            match Format::parse(name) {
                Some(f) if !formats.contains(&f) => formats.push(f),
                Some(_) => {}
                None => warn!(format = %name, "ignoring unknown output format"),
            }
        }
        formats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

/// The whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub request: RequestSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from `explicit` if given, else from the first default path that exists.
    ///
    /// Relative default paths are resolved against the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let candidates: Vec<PathBuf> = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect(),
        };

        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Err(ConfigError::NotFound { tried: candidates }),
        }
    }

    /// Read and parse one settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// A ClientBuilder primed with the request section.
    pub fn client_builder(&self) -> ClientBuilder {
        let timeout = if self.request.timeout.is_finite() && self.request.timeout > 0.0 {
            Duration::from_secs_f64(self.request.timeout)
        } else {
            warn!(timeout = self.request.timeout, "invalid request timeout, using default");
            Duration::from_secs_f64(RequestSettings::default().timeout)
        };
        ClientBuilder::new()
            .timeout(timeout)
            .user_agent(self.request.user_agent.clone())
            .concurrency(self.request.concurrency)
            .max_retries(self.request.max_retries)
    }
}
