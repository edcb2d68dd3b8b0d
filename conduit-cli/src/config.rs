//! Configuration module
//!
//! Handles CLI configuration including the relay URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the relay service
    pub relay_url: String,
}
