//! Configuration module
//!
//! Handles CLI configuration.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the remote basketball API
    pub api_url: String,
}
