use std::time::Duration;

use crate::{Error, Result, check::RetryPolicy, fetch::HttpClient};

/// Tuning for monitors and the HTTP client they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Time between playlist refreshes of one rendition.
    pub poll_interval: Duration,
    pub retry: RetryPolicy,
    /// Per-request timeout. `None` lets a hung server stall its monitor.
    pub request_timeout: Option<Duration>,
    /// Largest accepted response body. `None` reads bodies of any size.
    pub max_body_bytes: Option<u64>,
}

impl MonitorConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll interval must be positive".to_string()));
        }
        if self.retry.attempts == 0 {
            return Err(Error::Config(
                "at least one segment attempt is required".to_string(),
            ));
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::Config("request timeout must be positive".to_string()));
        }
        if self.max_body_bytes == Some(0) {
            return Err(Error::Config("maximum body size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn http_client(&self) -> Result<HttpClient> {
        HttpClient::with_options(self.request_timeout, self.max_body_bytes)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            retry: RetryPolicy::default(),
            request_timeout: None,
            max_body_bytes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.retry.delay, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = MonitorConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = MonitorConfig {
            retry: RetryPolicy::immediate(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            max_body_bytes: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
