//! Daemon configuration.
//!
//! Every setting comes from a `LOTSIZE_*` environment variable, optionally
//! seeded from a `.env` file. Missing variables fall back to defaults;
//! malformed ones are a startup error.

use crate::error::{DaemonError, DaemonResult};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

// =============================================================================
// Configuration
// =============================================================================

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Calculator defaults applied when a request omits a field
    pub defaults: CalculatorDefaults,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Calculator defaults.
#[derive(Debug, Clone)]
pub struct CalculatorDefaults {
    /// Leverage used when a request does not send one (100 = 1:100)
    pub leverage: Decimal,
    /// Risk percentage used when a percentage request omits it (2 = 2%)
    pub risk_percent: Decimal,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> DaemonResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let api = Self::load_api_config()?;
        let defaults = Self::load_calculator_defaults()?;

        Ok(Self {
            api,
            defaults,
            environment,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            defaults: CalculatorDefaults::default(),
            environment: Environment::Test,
        }
    }

    fn load_environment() -> DaemonResult<Environment> {
        let env_str = env::var("LOTSIZE_ENV").unwrap_or_else(|_| "development".to_string());
        Environment::from_str(&env_str)
    }

    fn load_api_config() -> DaemonResult<ApiConfig> {
        let host = env::var("LOTSIZE_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port_str = env::var("LOTSIZE_API_PORT").unwrap_or_else(|_| "8080".to_string());

        let port = port_str
            .parse::<u16>()
            .map_err(|_| DaemonError::Config(format!("Invalid LOTSIZE_API_PORT: {}", port_str)))?;

        Ok(ApiConfig { host, port })
    }

    fn load_calculator_defaults() -> DaemonResult<CalculatorDefaults> {
        let fallback = CalculatorDefaults::default();

        let leverage = Self::load_decimal_env("LOTSIZE_DEFAULT_LEVERAGE", fallback.leverage)?;
        if leverage <= Decimal::ZERO {
            return Err(DaemonError::Config(format!(
                "LOTSIZE_DEFAULT_LEVERAGE must be positive, got {}",
                leverage
            )));
        }

        let risk_percent =
            Self::load_decimal_env("LOTSIZE_DEFAULT_RISK_PERCENT", fallback.risk_percent)?;
        if risk_percent <= Decimal::ZERO || risk_percent > Decimal::ONE_HUNDRED {
            return Err(DaemonError::Config(format!(
                "LOTSIZE_DEFAULT_RISK_PERCENT must be in (0, 100], got {}",
                risk_percent
            )));
        }

        Ok(CalculatorDefaults {
            leverage,
            risk_percent,
        })
    }

    fn load_decimal_env(key: &str, default: Decimal) -> DaemonResult<Decimal> {
        match env::var(key) {
            Ok(val) => Decimal::from_str(&val)
                .map_err(|_| DaemonError::Config(format!("Invalid {} value: {}", key, val))),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            defaults: CalculatorDefaults::default(),
            environment: Environment::Development,
        }
    }
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            leverage: Decimal::ONE_HUNDRED,   // 1:100
            risk_percent: Decimal::TWO,       // 2%
        }
    }
}

impl FromStr for Environment {
    type Err = DaemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DaemonError::Config(format!(
                "Invalid LOTSIZE_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }
}

impl Environment {
    /// Name accepted by `LOTSIZE_ENV`
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.port, 8080);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test();

        assert_eq!(config.api.port, 0);
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn test_calculator_defaults() {
        let config = Config::default();

        assert_eq!(config.defaults.leverage, Decimal::new(100, 0));
        assert_eq!(config.defaults.risk_percent, Decimal::new(2, 0));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!(matches!("staging".parse::<Environment>(), Err(DaemonError::Config(_))));
    }

    #[test]
    fn test_environment_names_parse_back() {
        for environment in [Environment::Test, Environment::Development, Environment::Production] {
            assert_eq!(environment.to_string().parse::<Environment>().unwrap(), environment);
        }
    }

    #[test]
    fn test_load_decimal_env() {
        // Keys are unique to this test; tests share the process environment
        env::set_var("LOTSIZE_CONFIG_TEST_LEVERAGE", "50.5");
        env::set_var("LOTSIZE_CONFIG_TEST_GARBAGE", "fifty");

        let default = Decimal::ONE;
        assert_eq!(
            Config::load_decimal_env("LOTSIZE_CONFIG_TEST_LEVERAGE", default).unwrap(),
            Decimal::new(505, 1)
        );
        assert_eq!(
            Config::load_decimal_env("LOTSIZE_CONFIG_TEST_UNSET", default).unwrap(),
            default
        );
        assert!(matches!(
            Config::load_decimal_env("LOTSIZE_CONFIG_TEST_GARBAGE", default),
            Err(DaemonError::Config(_))
        ));
    }
}
