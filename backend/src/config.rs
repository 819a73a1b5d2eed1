use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api/admin";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

impl ConsoleConfig {
    /// Reads `ADMIN_API_BASE_URL`, `CONSOLE_BIND_ADDR` and `FETCH_TIMEOUT_MS`,
    /// falling back to the defaults for anything unset.
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("ADMIN_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            return Err(AppError::Config("ADMIN_API_BASE_URL is empty".to_string()));
        }

        let bind_addr = lookup("CONSOLE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("CONSOLE_BIND_ADDR is invalid: {}", e)))?;

        let fetch_timeout_ms = match lookup("FETCH_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("FETCH_TIMEOUT_MS is invalid: {}", e)))?,
            None => DEFAULT_FETCH_TIMEOUT_MS,
        };
        if fetch_timeout_ms == 0 {
            return Err(AppError::Config("FETCH_TIMEOUT_MS must be positive".to_string()));
        }

        Ok(Self {
            api_base_url,
            bind_addr,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
        })
    }
}
