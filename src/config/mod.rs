use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub mod cors;
pub mod request_log;
pub mod security;

pub use cors::create_cors_layer;
pub use request_log::log_api_request;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEVELOPMENT_CLIENT_DIR: &str = "client";
const PRODUCTION_CLIENT_DIR: &str = "dist/public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set. Did you forget to provision a database?")]
    MissingDatabaseUrl,

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("Could not find the build directory: {0}, make sure to build the client first")]
    MissingClientBuild(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<String>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub client_dir: PathBuf,
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let environment = Environment::parse(lookup("RUST_ENV"));
        let client_dir = lookup("CLIENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| match environment {
                Environment::Development => PathBuf::from(DEVELOPMENT_CLIENT_DIR),
                Environment::Production => PathBuf::from(PRODUCTION_CLIENT_DIR),
            });

        Ok(Self {
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            host: parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            environment,
            client_dir,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Production refuses to start without a client build; development
    /// serves no assets when the directory is missing.
    pub fn client_dir_checked(&self) -> Result<Option<PathBuf>, ConfigError> {
        if self.client_dir.is_dir() {
            return Ok(Some(self.client_dir.clone()));
        }
        match self.environment {
            Environment::Production => Err(ConfigError::MissingClientBuild(self.client_dir.clone())),
            Environment::Development => {
                tracing::warn!(
                    "Client directory {} not found, serving the API only",
                    self.client_dir.display()
                );
                Ok(None)
            }
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
