//! Service configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_PAGINATION_COUNT: u32 = 10;

/// Service configuration
///
/// # Environment Variables
/// - `PAGINATION_COUNT`: default page size of `GET /user` (default: 10)
/// - `APP_HOST`: listen address (default: "0.0.0.0")
/// - `APP_PORT`: listen port (default: 3000)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub pagination_count: u32,
    pub app_host: String,
    pub app_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pagination_count: DEFAULT_PAGINATION_COUNT,
            app_host: "0.0.0.0".to_string(),
            app_port: 3000,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut config: AppConfig = Config::builder()
            .set_default("pagination_count", i64::from(defaults.pagination_count))?
            .set_default("app_host", defaults.app_host)?
            .set_default("app_port", i64::from(defaults.app_port))?
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.pagination_count == 0 {
            config.pagination_count = DEFAULT_PAGINATION_COUNT;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PAGINATION_COUNT");
            std::env::remove_var("APP_HOST");
            std::env::remove_var("APP_PORT");
        }
    }

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.pagination_count, 10);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_app_config_from_env_with_custom_values() {
        clear_env();
        unsafe {
            std::env::set_var("PAGINATION_COUNT", "25");
            std::env::set_var("APP_HOST", "127.0.0.1");
            std::env::set_var("APP_PORT", "8081");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.pagination_count, 25);
        assert_eq!(config.bind_address(), "127.0.0.1:8081");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_pagination_count_falls_back_to_default() {
        clear_env();
        unsafe {
            std::env::set_var("PAGINATION_COUNT", "0");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.pagination_count, DEFAULT_PAGINATION_COUNT);

        clear_env();
    }
}
