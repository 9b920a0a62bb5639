use super::Config;
use crate::error::ConfigError;
use std::fs;
use std::path::Path;

impl Config {
    /// Read and decode a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Best-effort startup load.
    ///
    /// A missing or malformed file is logged and replaced by the default
    /// config so the process still starts. Summarize calls then run against
    /// zero-valued settings and are rejected.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(error @ ConfigError::Read { .. }) => {
                tracing::error!(error = %error, "Failed to read summarize config");
                Self::default()
            }
            Err(error @ ConfigError::Parse { .. }) => {
                tracing::error!(error = %error, "Failed to parse summarize config");
                Self::default()
            }
        }
    }
}
