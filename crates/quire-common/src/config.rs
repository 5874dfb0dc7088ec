//! Storage configuration.
//!
//! Loaded from a TOML file (with `$VAR` environment substitution) or straight
//! from environment variables:
//!
//! ```toml
//! [storage]
//! endpoint = "https://media.example.com/api/upload"
//! field_name = "file"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "QUIRE_UPLOAD_ENDPOINT";
pub const TIMEOUT_VAR: &str = "QUIRE_UPLOAD_TIMEOUT_SECS";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Where captured files are posted.
    pub endpoint: Url,
    /// Multipart field carrying the file.
    pub field_name: String,
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://localhost:3000/api/upload")
                .expect("default endpoint is a valid url"),
            field_name: "file".into(),
            timeout_secs: 30,
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Config pointing at `endpoint` with default field name and timeout.
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    /// Read `QUIRE_UPLOAD_ENDPOINT` and `QUIRE_UPLOAD_TIMEOUT_SECS`, keeping
    /// defaults for anything unset.
    pub fn from_env() -> miette::Result<Self> {
        Self::from_vars(|var| env::var(var).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> miette::Result<Self> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENDPOINT_VAR) {
            config.endpoint = Url::parse(&value)
                .map_err(|source| ConfigError::InvalidEndpoint { value, source })?;
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: TIMEOUT_VAR,
                value,
            })?;
        }
        Ok(config)
    }
}

impl Config {
    pub fn load(config_file: impl AsRef<Path>) -> miette::Result<Config> {
        let path = config_file.as_ref();
        let config_string = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&config_string, env::vars())
    }

    fn parse(
        source: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> miette::Result<Config> {
        let mut config_string = source.to_owned();
        // substitute environment variables in config file
        for (k, v) in vars {
            config_string = config_string.replace(&format!("${}", k), &v);
        }
        Ok(toml::from_str(&config_string).map_err(ConfigError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.endpoint.as_str(), "http://localhost:3000/api/upload");
        assert_eq!(config.field_name, "file");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn parses_partial_file_with_substitution() {
        let source = r#"
            [storage]
            endpoint = "https://$MEDIA_HOST/api/upload"
        "#;
        let vars = [("MEDIA_HOST".to_string(), "media.example.com".to_string())];
        let config = Config::parse(source, vars).unwrap();
        assert_eq!(
            config.storage.endpoint.as_str(),
            "https://media.example.com/api/upload"
        );
        assert_eq!(config.storage.field_name, "file");
        assert_eq!(config.storage.timeout_secs, 30);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::parse("", no_vars()).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn bad_endpoint_is_a_parse_error() {
        let source = "[storage]\nendpoint = \"not a url\"\n";
        assert!(Config::parse(source, no_vars()).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        fs::write(&path, "[storage]\ntimeout_secs = 5\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.storage.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("/no/such/quire.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/quire.toml"));
    }

    #[test]
    fn env_overrides() {
        let config = StorageConfig::from_vars(|var| match var {
            ENDPOINT_VAR => Some("https://up.example.com/files".into()),
            TIMEOUT_VAR => Some("12".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.endpoint.as_str(), "https://up.example.com/files");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn env_rejects_garbage() {
        assert!(StorageConfig::from_vars(|var| (var == TIMEOUT_VAR).then(|| "soon".into())).is_err());
        assert!(StorageConfig::from_vars(|var| (var == ENDPOINT_VAR).then(|| "::".into())).is_err());
    }
}
