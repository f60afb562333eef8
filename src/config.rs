use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GeomemoConfig {
    pub logging: LoggingConfig,
    pub services: ServicesConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

/// Remote place-search and geocoding backend.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServicesConfig {
    pub provider: String,
    pub base_url: String,
    pub user_agent: String,
    pub search_limit: usize,
    pub timeout_secs: u64,
    /// Sent as `Accept-Language` when set.
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ViewportConfig {
    pub padding_factor: f64,
    /// Delta used for an axis whose points all coincide, in degrees.
    pub min_span: f64,
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_span: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            provider: "nominatim".into(),
            base_url: "https://nominatim.openstreetmap.org".into(),
            user_agent: concat!("geomemo/", env!("CARGO_PKG_VERSION")).into(),
            search_limit: 8,
            timeout_secs: 10,
            language: None,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding_factor: 1.2,
            min_span: 0.05,
            default_latitude: 37.7749,
            default_longitude: -122.4194,
            default_span: 0.1,
        }
    }
}

/// Returns `~/.geomemo/`, or `.geomemo/` when no home directory is known.
pub fn default_geomemo_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geomemo")
}

/// Returns the default config file path: `~/.geomemo/config.toml`
pub fn default_config_path() -> PathBuf {
    default_geomemo_dir().join("config.toml")
}

impl GeomemoConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            GeomemoConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (GEOMEMO_LOG_LEVEL, GEOMEMO_BASE_URL, GEOMEMO_USER_AGENT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GEOMEMO_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("GEOMEMO_BASE_URL") {
            self.services.base_url = val;
        }
        if let Ok(val) = std::env::var("GEOMEMO_USER_AGENT") {
            self.services.user_agent = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GeomemoConfig::default();
        assert_eq!(config.logging.log_level, "info");
        assert_eq!(config.services.provider, "nominatim");
        assert!(config.services.user_agent.starts_with("geomemo/"));
        assert!((config.viewport.padding_factor - 1.2).abs() < f64::EPSILON);
        assert!(config.viewport.min_span > 0.0);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[logging]
log_level = "debug"

[services]
base_url = "http://localhost:8080"
search_limit = 3

[viewport]
min_span = 0.5
"#;
        let config: GeomemoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.log_level, "debug");
        assert_eq!(config.services.base_url, "http://localhost:8080");
        assert_eq!(config.services.search_limit, 3);
        assert!((config.viewport.min_span - 0.5).abs() < f64::EPSILON);
        // defaults still apply for unset fields
        assert_eq!(config.services.timeout_secs, 10);
        assert!((config.viewport.default_latitude - 37.7749).abs() < 1e-9);
    }

    #[test]
    fn load_from_file_and_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[services]\nprovider = \"nominatim\"\ntimeout_secs = 3\n").unwrap();

        let config = GeomemoConfig::load_from(&path).unwrap();
        assert_eq!(config.services.timeout_secs, 3);

        let missing = GeomemoConfig::load_from(tmp.path().join("nope.toml")).unwrap();
        assert_eq!(missing.services.timeout_secs, 10);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[viewport\nmin_span = ").unwrap();

        let err = GeomemoConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config TOML"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = GeomemoConfig::default();
        std::env::set_var("GEOMEMO_LOG_LEVEL", "trace");
        std::env::set_var("GEOMEMO_BASE_URL", "http://geo.internal");
        std::env::set_var("GEOMEMO_USER_AGENT", "tests/1.0");

        config.apply_env_overrides();

        assert_eq!(config.logging.log_level, "trace");
        assert_eq!(config.services.base_url, "http://geo.internal");
        assert_eq!(config.services.user_agent, "tests/1.0");

        // Clean up
        std::env::remove_var("GEOMEMO_LOG_LEVEL");
        std::env::remove_var("GEOMEMO_BASE_URL");
        std::env::remove_var("GEOMEMO_USER_AGENT");
    }
}
