use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Budget the "Remaining" card counts down from.
    #[serde(default = "default_monthly_budget")]
    pub monthly_budget: f64,
}

fn default_api_url() -> String {
    "http://localhost:3030/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_monthly_budget() -> f64 {
    100_000.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            monthly_budget: default_monthly_budget(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TALLY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be positive".to_string());
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:3030/api");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://tally.example.com/api/\"\nmonthly_budget = 2500.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.api_base(), "https://tally.example.com/api");
        assert_eq!(settings.monthly_budget, 2500.0);
        assert_eq!(settings.request_timeout_secs, 10);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let settings = Settings {
            api_url: "localhost:3030".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
