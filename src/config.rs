//! Resolver configuration, read from `~/.geonorm/config.json`.
//!
//! Every field has a default; a missing default file is not an error,
//! a missing explicit file is.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("geonorm/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Nominatim-compatible search endpoint.
    pub geocoder_url: String,
    pub user_agent: String,
    /// Language requested from the geocoder.
    pub language: String,
    pub timeout_secs: u64,
    /// Maximum number of cached geocoder outcomes.
    pub cache_capacity: usize,
    /// Persist the cache here when set.
    pub cache_path: Option<PathBuf>,
    /// Re-check geocoded country names against the reference set.
    pub validate_geocoded: bool,
    /// Never call the geocoder.
    pub offline: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            language: "en".to_string(),
            timeout_secs: 10,
            cache_capacity: 4096,
            cache_path: None,
            validate_geocoded: true,
            offline: false,
        }
    }
}

impl ResolverConfig {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::read_file(p),
            None => {
                let p = Self::default_path();
                if p.exists() {
                    Self::read_file(&p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn default_path() -> PathBuf {
        Self::base_dir().join("config.json")
    }

    /// Where `--cache` without a path puts the cache file.
    pub fn default_cache_path() -> PathBuf {
        Self::base_dir().join("cache.json")
    }

    fn base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geonorm")
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".into());
        }
        if self.language.trim().is_empty() {
            return Err("language must not be empty".into());
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.language, "en");
        assert!(cfg.validate_geocoded);
        assert!(!cfg.offline);
        assert!(cfg.cache_path.is_none());
        assert!(cfg.user_agent.starts_with("geonorm/"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "offline": true, "cache_capacity": 16 }"#).unwrap();

        let cfg = ResolverConfig::load(Some(&path)).unwrap();
        assert!(cfg.offline);
        assert_eq!(cfg.cache_capacity, 16);
        assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = ResolverConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "timeout_secs": 0 }"#).unwrap();
        let err = ResolverConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ResolverConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
