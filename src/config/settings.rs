use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use url::Url;

use super::paths::Paths;
use crate::error::{Result, UniscoutError};

/// Default Open Library endpoint
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote content source
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Durable cache behaviour
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the Open Library compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Durable cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window for cached catalog entries
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

fn default_ttl_hours() -> u64 {
    24
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Cache freshness window
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_hours.saturating_mul(3600))
    }

    /// Remote request timeout
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }

    /// Set the remote base URL, rejecting anything that isn't http(s)
    pub fn set_base_url(&mut self, value: &str) -> Result<()> {
        let parsed = Url::parse(value).map_err(|_| {
            UniscoutError::InvalidArgument(format!("Invalid URL: {value}"))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UniscoutError::InvalidArgument(format!(
                "remote.base_url must use http or https, got {}",
                parsed.scheme()
            )));
        }

        self.remote.base_url = value.trim_end_matches('/').to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_paths(temp_dir: &TempDir) -> Paths {
        Paths::under(temp_dir.path())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Default Value Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn test_cache_ttl_is_24_hours_by_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(24 * 3600));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load/Save Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_default_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let config = Config::load_from(&paths).unwrap();
        assert_eq!(config.cache.ttl_hours, 24);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut config = Config::default();
        config.remote.base_url = "http://localhost:1234".to_string();
        config.cache.ttl_hours = 6;
        config.output.format = "json".to_string();
        config.save_to(&paths).unwrap();

        let loaded = Config::load_from(&paths).unwrap();
        assert_eq!(loaded.remote.base_url, "http://localhost:1234");
        assert_eq!(loaded.cache.ttl_hours, 6);
        assert_eq!(loaded.output.format, "json");
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(
            &paths.config_file,
            r#"
[cache]
ttl_hours = 1
"#,
        )
        .unwrap();

        let config = Config::load_from(&paths).unwrap();
        assert_eq!(config.cache.ttl_hours, 1);
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(&paths.config_file, "[cache\nttl_hours = ").unwrap();

        assert!(matches!(
            Config::load_from(&paths),
            Err(UniscoutError::Toml(_))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setter Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_base_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.set_base_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(config.remote.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_set_base_url_rejects_other_schemes() {
        let mut config = Config::default();
        assert!(config.set_base_url("ftp://example.com").is_err());
        assert!(config.set_base_url("not a url").is_err());
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_restrictive_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        Config::default().save_to(&paths).unwrap();

        let mode = fs::metadata(&paths.config_file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Config file should have 0600 permissions");
    }
}
