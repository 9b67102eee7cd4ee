use crate::diagnosis::{ConsultationPolicy, DEFAULT_TOP_N};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub diagnosis: DiagnosisConfig,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value)?,
            Err(_) => LogFormat::Compact,
        };

        let diagnosis = DiagnosisConfig {
            default_top_n: read_count("APP_DEFAULT_TOP_N", DEFAULT_TOP_N)?,
            max_top_n: read_count("APP_MAX_TOP_N", 10)?,
            min_symptom_chars: read_count("APP_MIN_SYMPTOM_CHARS", 10)?,
            catalog_path: env::var("APP_CATALOG_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };

        if diagnosis.default_top_n > diagnosis.max_top_n {
            return Err(ConfigError::TopNOutOfRange {
                default_top_n: diagnosis.default_top_n,
                max_top_n: diagnosis.max_top_n,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            diagnosis,
        })
    }
}

fn read_count(variable: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidCount { variable, value: raw }),
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

/// Log output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Consultation limits and the optional replacement catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisConfig {
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub min_symptom_chars: usize,
    pub catalog_path: Option<PathBuf>,
}

impl DiagnosisConfig {
    pub fn policy(&self) -> ConsultationPolicy {
        ConsultationPolicy {
            default_top_n: self.default_top_n,
            max_top_n: self.max_top_n,
            min_symptom_chars: self.min_symptom_chars,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidCount { variable: &'static str, value: String },
    TopNOutOfRange { default_top_n: usize, max_top_n: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'pretty' (got '{value}')")
            }
            ConfigError::InvalidCount { variable, value } => {
                write!(f, "{variable} must be a non-negative integer (got '{value}')")
            }
            ConfigError::TopNOutOfRange {
                default_top_n,
                max_top_n,
            } => write!(
                f,
                "APP_DEFAULT_TOP_N ({default_top_n}) cannot exceed APP_MAX_TOP_N ({max_top_n})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLogFormat(_)
            | ConfigError::InvalidCount { .. }
            | ConfigError::TopNOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_DEFAULT_TOP_N",
            "APP_MAX_TOP_N",
            "APP_MIN_SYMPTOM_CHARS",
            "APP_CATALOG_PATH",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.diagnosis.policy(), ConsultationPolicy::default());
        assert!(config.diagnosis.catalog_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_consultation_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_TOP_N", "5");
        env::set_var("APP_MAX_TOP_N", "8");
        env::set_var("APP_MIN_SYMPTOM_CHARS", "3");
        env::set_var("APP_CATALOG_PATH", "/srv/medisym/diseases.json");
        env::set_var("APP_LOG_FORMAT", "Pretty");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.diagnosis.default_top_n, 5);
        assert_eq!(config.diagnosis.max_top_n, 8);
        assert_eq!(config.diagnosis.min_symptom_chars, 3);
        assert_eq!(
            config.diagnosis.catalog_path,
            Some(PathBuf::from("/srv/medisym/diseases.json"))
        );
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
        reset_env();
    }

    #[test]
    fn rejects_invalid_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MAX_TOP_N", "many");
        let err = AppConfig::load().expect_err("non-numeric limit");
        assert!(matches!(
            err,
            ConfigError::InvalidCount {
                variable: "APP_MAX_TOP_N",
                ..
            }
        ));

        reset_env();
        env::set_var("APP_DEFAULT_TOP_N", "12");
        let err = AppConfig::load().expect_err("default above max");
        assert!(matches!(err, ConfigError::TopNOutOfRange { .. }));
        reset_env();
    }
}
