use crate::compliance::TenantId;
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
    pub auth: AuthConfig,
    pub compliance: ComplianceConfig,
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

        let demo_email =
            env::var("DEMO_EMAIL").unwrap_or_else(|_| "demo@fastighet.se".to_string());
        let demo_password = env::var("DEMO_PASSWORD").unwrap_or_else(|_| "demo123".to_string());
        let demo_tenant = env::var("DEMO_TENANT_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u64>()
            .map(TenantId)
            .map_err(|_| ConfigError::InvalidTenantId)?;

        let required_document_types: Vec<String> = env::var("REQUIRED_DOCUMENT_TYPES")
            .unwrap_or_else(|_| "ritning,OVK,brandskydd,service".to_string())
            .split(',')
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        if required_document_types.is_empty() {
            return Err(ConfigError::EmptyRequiredTypes);
        }

        let validity_window_years = env::var("DOCUMENT_VALIDITY_YEARS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidValidityWindow)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            auth: AuthConfig {
                demo_email,
                demo_password,
                demo_tenant,
            },
            compliance: ComplianceConfig {
                required_document_types,
                validity_window_years,
            },
        })
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

/// Demo login credentials backing the session endpoint.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub demo_email: String,
    pub demo_password: String,
    pub demo_tenant: TenantId,
}

/// Externally configured compliance inputs: the required document categories
/// in canonical display order and the staleness window.
#[derive(Debug, Clone)]
pub struct ComplianceConfig {
    pub required_document_types: Vec<String>,
    pub validity_window_years: i32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTenantId,
    InvalidValidityWindow,
    EmptyRequiredTypes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTenantId => write!(f, "DEMO_TENANT_ID must be a valid u64"),
            ConfigError::InvalidValidityWindow => {
                write!(f, "DOCUMENT_VALIDITY_YEARS must be a valid i32")
            }
            ConfigError::EmptyRequiredTypes => {
                write!(f, "REQUIRED_DOCUMENT_TYPES must name at least one document type")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
