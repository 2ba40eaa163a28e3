//! Configuration for the stretch worker.

use serde::{Deserialize, Serialize};

/// Configuration for the frame service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Maximum decode/stretch jobs running on the blocking pool at once.
    pub max_concurrency: usize,

    /// Render with the filtered palette unless a request says otherwise.
    pub default_filtered: bool,

    /// Use the thread-local destination buffer for PNG previews.
    pub pool_buffers: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            default_filtered: false,
            pool_buffers: true,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STRETCH_MAX_CONCURRENCY") {
            if let Ok(n) = val.parse() {
                config.max_concurrency = n;
            }
        }

        if let Ok(val) = std::env::var("STRETCH_DEFAULT_FILTERED") {
            config.default_filtered = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("STRETCH_POOL_BUFFERS") {
            config.pool_buffers = parse_flag(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WorkerConfig::default();
        assert_eq!(config.max_concurrency, 4);
        assert!(config.pool_buffers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = WorkerConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("0"));
    }
}
