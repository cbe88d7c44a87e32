//! Configuration module
//!
//! Handlers that need more than positional plugin arguments read a TOML
//! file whose path is passed as one of those arguments.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Load and deserialize a TOML configuration file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Loading configuration from {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let config = toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"edge\"").unwrap();

        let sample: Sample = load_toml(file.path()).unwrap();
        assert_eq!(sample.name, "edge");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_toml::<Sample>(Path::new("/nonexistent/ovpn-handler.toml"));
        assert!(matches!(
            result,
            Err(PluginError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        let result = load_toml::<Sample>(file.path());
        assert!(matches!(
            result,
            Err(PluginError::Config(ConfigError::ParseFailed { .. }))
        ));
    }
}
