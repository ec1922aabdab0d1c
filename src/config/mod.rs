//! Process configuration, loaded entirely from environment variables.

use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub origin_host: Option<String>,
    pub client_timeout: Duration,
    pub propeller_host: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: ":8080".to_string(),
            log_level: "debug".to_string(),
            origin_host: None,
            client_timeout: Duration::from_secs(5),
            propeller_host: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to spec
    /// defaults for every variable that is unset. Only a malformed
    /// `CLIENT_TIMEOUT` is a load error; every other variable is a plain
    /// string so it can't fail to parse.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = std::env::var("HTTP_PORT").unwrap_or(defaults.listen_addr);
        let log_level = std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let origin_host = std::env::var("ORIGIN_HOST").ok();
        let propeller_host = std::env::var("PROPELLER_HOST").ok();

        let client_timeout = match std::env::var("CLIENT_TIMEOUT") {
            Ok(raw) => humantime::parse_duration(&raw)
                .with_context(|| format!("parsing CLIENT_TIMEOUT {raw:?}"))?,
            Err(_) => defaults.client_timeout,
        };

        Ok(Self {
            listen_addr,
            log_level,
            origin_host,
            client_timeout,
            propeller_host,
        })
    }

    /// Normalize `listen_addr` for `TcpListener::bind`: a bare `:8080` form
    /// (Go's `net.Listen` convention) binds every interface, same as
    /// `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> String {
        if self.listen_addr.starts_with(':') {
            format!("0.0.0.0{}", self.listen_addr)
        } else {
            self.listen_addr.clone()
        }
    }
}
