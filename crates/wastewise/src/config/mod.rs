use crate::analysis::{AnalysisSettings, YardsConversion};
use crate::report::BrandConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisSettings,
    pub brand: BrandConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: load_analysis_settings()?,
            brand: load_brand(),
        })
    }
}

fn load_analysis_settings() -> Result<AnalysisSettings, ConfigError> {
    let defaults = AnalysisSettings::default();

    let yards_conversion = match env::var("WASTEWISE_YARDS_CONVERSION") {
        Ok(value) => YardsConversion::parse(&value)
            .ok_or(ConfigError::InvalidYardsConversion { value })?,
        Err(_) => defaults.yards_conversion,
    };

    Ok(AnalysisSettings {
        install_cost: number_var("WASTEWISE_INSTALL_COST", defaults.install_cost)?,
        monitoring_cost: number_var("WASTEWISE_MONITORING_COST", defaults.monitoring_cost)?,
        yards_conversion,
        target_occupancy_pct: defaults.target_occupancy_pct,
    })
}

fn load_brand() -> BrandConfig {
    let mut brand = BrandConfig::default();
    if let Some(name) = env::var("WASTEWISE_BRAND")
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        brand.name = name.trim().to_string();
    }
    if let Ok(contacts) = env::var("WASTEWISE_CONTACTS") {
        brand.contacts = BrandConfig::parse_contacts(&contacts);
    }
    brand
}

fn number_var(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite() && *number >= 0.0)
            .ok_or(ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    InvalidYardsConversion { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative number, got '{value}'")
            }
            ConfigError::InvalidYardsConversion { value } => write!(
                f,
                "WASTEWISE_YARDS_CONVERSION must be 'standard' or 'density', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidYardsConversion { .. } => None,
        }
    }
}
