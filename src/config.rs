use std::{
    env,
    net::{IpAddr, SocketAddr},
};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16")]
    InvalidPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = env::var("PORT")
            .ok()
            .map(|value| {
                value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort)
            })
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        let config = Self { bind_addr, port };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .bind_addr
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidSocket)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://localhost:{}/mcp", self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn parse_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::remove_var("PORT");
        env::remove_var("BIND_ADDR");

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.endpoint_url(), "http://localhost:3001/mcp");
    }

    #[test]
    fn port_is_read_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var("PORT", "8123");
        env::remove_var("BIND_ADDR");

        let config = Config::from_env().expect("config should parse");
        env::remove_var("PORT");

        assert_eq!(config.port, 8123);
        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "0.0.0.0:8123".parse().expect("valid socket")
        );
    }

    #[test]
    fn non_numeric_port_fails() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var("PORT", "not-a-port");
        env::remove_var("BIND_ADDR");

        let err = Config::from_env().expect_err("expected invalid port error");
        env::remove_var("PORT");

        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn ipv6_bind_addr_parses() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var("PORT", "3002");
        env::set_var("BIND_ADDR", "::");

        let config = Config::from_env().expect("config should parse");
        env::remove_var("PORT");
        env::remove_var("BIND_ADDR");

        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "[::]:3002".parse::<SocketAddr>().expect("valid socket")
        );
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::remove_var("PORT");
        env::set_var("BIND_ADDR", "not an address");

        let err = Config::from_env().expect_err("expected invalid socket error");
        env::remove_var("BIND_ADDR");

        assert!(matches!(err, ConfigError::InvalidSocket));
    }
}
