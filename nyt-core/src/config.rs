use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable consulted for the API key when no flag is given.
pub const API_KEY_ENV: &str = "NYT_API_KEY";

/// Request timeout used when neither the flag nor the config file sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Where the API key in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Environment,
    ConfigFile,
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiKeySource::Flag => "command-line flag",
            ApiKeySource::Environment => API_KEY_ENV,
            ApiKeySource::ConfigFile => "config file",
        };
        f.write_str(s)
    }
}

/// No API key could be found in any source.
#[derive(Debug, thiserror::Error)]
#[error(
    "No API key provided via --apikey, NYT_API_KEY or the config file.\n\
     Hint: run `nyt configure` and enter your API key."
)]
pub struct MissingApiKey;

/// The config file could not be located, read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Could not determine platform config directory")]
    NoConfigDir,
    #[error("Failed to read config file: {}", .0.display())]
    Read(PathBuf),
    #[error("Failed to parse config file: {}", .0.display())]
    Parse(PathBuf),
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| ConfigFileError::Read(path.to_path_buf()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| ConfigFileError::Parse(path.to_path_buf()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "nyt-cli", "nyt").ok_or(ConfigFileError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Pick the API key: flag > environment > config file. Blank values are skipped.
    pub fn resolve_api_key(
        &self,
        flag: Option<&str>,
        env: Option<&str>,
    ) -> std::result::Result<(String, ApiKeySource), MissingApiKey> {
        let candidates = [
            (flag, ApiKeySource::Flag),
            (env, ApiKeySource::Environment),
            (self.api_key.as_deref(), ApiKeySource::ConfigFile),
        ];

        candidates
            .into_iter()
            .find_map(|(value, source)| {
                value
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (v.to_string(), source))
            })
            .ok_or(MissingApiKey)
    }

    /// Pick the request timeout: flag > config file > [`DEFAULT_TIMEOUT`].
    pub fn resolve_timeout(&self, flag_secs: Option<u64>) -> Duration {
        flag_secs
            .or(self.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}
