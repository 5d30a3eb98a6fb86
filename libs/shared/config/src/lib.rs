use std::env;
use std::fmt::Display;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;
use tracing::warn;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DIAGNOSIS_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Number of diagnosis results kept in memory. Zero disables caching.
    pub diagnosis_cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            diagnosis_cache_capacity: DEFAULT_DIAGNOSIS_CACHE_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using default");
                    DEFAULT_SERVER_HOST.to_string()
                }),
            server_port: parse_or_default(
                "SERVER_PORT",
                env::var("SERVER_PORT").ok(),
                DEFAULT_SERVER_PORT,
            ),
            diagnosis_cache_capacity: parse_or_default(
                "DIAGNOSIS_CACHE_CAPACITY",
                env::var("DIAGNOSIS_CACHE_CAPACITY").ok(),
                DEFAULT_DIAGNOSIS_CACHE_CAPACITY,
            ),
        };

        if !config.is_cache_enabled() {
            warn!("Diagnosis result cache disabled (DIAGNOSIS_CACHE_CAPACITY=0)");
        }

        config
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.diagnosis_cache_capacity > 0
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, value, default);
            default
        }),
        None => {
            warn!("{} not set, using default {}", key, default);
            default
        }
    }
}
