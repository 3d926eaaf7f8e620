use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend_url: String,
    pub bind_addr: SocketAddr,
    pub counters: CounterSettings,
}

/// Timing of the dashboard counter animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterSettings {
    pub duration: Duration,
    pub frame: Duration,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            frame: Duration::from_millis(16),
        }
    }
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let defaults = CounterSettings::default();
        let counters = CounterSettings {
            duration: millis_from_env("COUNTER_DURATION_MS")?.unwrap_or(defaults.duration),
            frame: millis_from_env("COUNTER_FRAME_MS")?.unwrap_or(defaults.frame),
        };
        if counters.frame.is_zero() {
            return Err(AppError::Config("COUNTER_FRAME_MS must be positive".to_string()));
        }

        Ok(Self {
            backend_url,
            bind_addr,
            counters,
        })
    }
}

fn millis_from_env(key: &str) -> Result<Option<Duration>, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", key, e))),
        Err(_) => Ok(None),
    }
}
