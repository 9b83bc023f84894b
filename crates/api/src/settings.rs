//! Service Configuration
//!
//! Layered from built-in defaults, an optional config file and `COHORT_*`
//! environment variables (`COHORT_SERVER__BIND_ADDR=0.0.0.0:9000`).

use crate::rate_limit::RateLimitConfig;
use cohort_engine::StaticMetrics;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Config file used when `COHORT_CONFIG` is not set (any supported extension)
pub const DEFAULT_CONFIG_FILE: &str = "cohort-dashboard";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    /// Operational figures reported by `/stats`
    pub stats: StaticMetrics,
    pub cors: CorsSettings,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON array of patient records
    pub records_path: String,
    /// Data model document; the built-in model is used when unset
    pub data_model_path: Option<String>,
    /// Refuse to start when categorical values fall outside their domain
    pub strict_domains: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            records_path: "data/patients.json".to_string(),
            data_model_path: None,
            strict_domains: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load from `COHORT_CONFIG` (or the default file) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("COHORT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(&path).required(false))
                .add_source(environment()),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COHORT")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(settings.stats, StaticMetrics::default());
        assert_eq!(settings.cors.allowed_origins, vec!["*"]);
        assert!(!settings.rate_limit.enabled);
        assert!(!settings.data.strict_domains);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml = r#"
            [data]
            records_path = "/srv/pag/patients.json"
            strict_domains = true

            [stats]
            queries = 2048

            [rate_limit]
            enabled = true
        "#;
        let settings =
            Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
                .unwrap();

        assert_eq!(settings.data.records_path, "/srv/pag/patients.json");
        assert!(settings.data.strict_domains);
        assert_eq!(settings.data.data_model_path, None);
        assert_eq!(settings.stats.queries, 2048);
        assert_eq!(settings.stats.researchers, 20);
        assert!(settings.rate_limit.enabled);
        assert_eq!(settings.rate_limit.burst_size, 5);
        assert_eq!(settings.server.bind_addr, "0.0.0.0:8000");
    }
}
