//! Configuration for the booking wizard.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the hosted item/booking service
    pub api_base_url: String,
    /// Operator WhatsApp number receiving booking notifications
    pub operator_phone: String,
    /// Simulated payment processing delay in milliseconds
    pub processing_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to defaults; configuration
    /// never blocks startup.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("TRIPFLOW_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            operator_phone: env::var("TRIPFLOW_OPERATOR_PHONE")
                .unwrap_or_else(|_| "201273426669".to_string()),
            processing_delay_ms: env::var("TRIPFLOW_PROCESSING_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2000),
        }
    }

    /// Processing delay as a [`Duration`]
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            operator_phone: "201273426669".to_string(),
            processing_delay_ms: 2000,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.operator_phone, "201273426669");
        assert_eq!(config.processing_delay(), Duration::from_millis(2000));
    }
}
