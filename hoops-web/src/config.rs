//! Front-end configuration
//!
//! Where the remote basketball API lives, where to listen, and how long an
//! outbound call may take.

use std::time::Duration;

/// Front-end configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote API base address (e.g., "http://localhost:5000/api")
    pub api_url: String,

    /// Address the front-end binds to
    pub bind_addr: String,

    /// Upper bound on a single outbound call
    pub api_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            bind_addr: "0.0.0.0:8080".to_string(),
            api_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Each variable overrides its default independently:
    /// - HOOPS_API_URL (default: http://localhost:5000/api)
    /// - HOOPS_BIND_ADDR (default: 0.0.0.0:8080)
    /// - HOOPS_API_TIMEOUT (seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("HOOPS_API_URL") {
            config.api_url = url;
        }

        if let Some(addr) = lookup("HOOPS_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(raw) = lookup("HOOPS_API_TIMEOUT") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("HOOPS_API_TIMEOUT must be a whole number of seconds, got {raw:?}")
            })?;
            config.api_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.api_timeout.is_zero() {
            anyhow::bail!("api_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000/api".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_from_lookup_overrides_each_variable_independently() {
        let config = Config::from_lookup(vars(&[("HOOPS_BIND_ADDR", "127.0.0.1:9999")])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.bind_addr, "127.0.0.1:9999");
        assert_eq!(config.api_timeout, Duration::from_secs(30));

        let config = Config::from_lookup(vars(&[
            ("HOOPS_API_URL", "https://league.example.com/api"),
            ("HOOPS_API_TIMEOUT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://league.example.com/api");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.api_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_rejects_unparsable_timeout() {
        let err = Config::from_lookup(vars(&[("HOOPS_API_TIMEOUT", "soon")])).unwrap_err();
        assert!(err.to_string().contains("HOOPS_API_TIMEOUT"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.api_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        config.api_url = "https://api.example.com".to_string();
        assert!(config.validate().is_ok());

        config.api_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
