//! Timing configuration for wait handlers.
//!
//! Durations are (de)serialized as integer milliseconds so a config can be
//! embedded in JSON settings files:
//!
//! ```
//! use resource_wait::WaitConfig;
//! use std::time::Duration;
//!
//! let config: WaitConfig = serde_json::from_str(r#"{"timeout_ms": 60000}"#).unwrap();
//! assert_eq!(config.timeout, Duration::from_secs(60));
//! assert_eq!(config.poll_interval, WaitConfig::DEFAULT_POLL_INTERVAL);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WaitError;
use crate::WaitResult;

/// Timing knobs for a single wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Maximum wall-clock time the wait may run
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,
    /// Delay between consecutive polls
    #[serde(rename = "poll_interval_ms", with = "millis")]
    pub poll_interval: Duration,
    /// Delay before the first poll; counts against the timeout
    #[serde(rename = "initial_delay_ms", with = "millis")]
    pub initial_delay: Duration,
}

impl WaitConfig {
    /// Timeout used when none is configured
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
    /// Poll interval used when none is configured
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

    /// Reject settings that would make the loop spin.
    pub fn validate(&self) -> WaitResult<()> {
        if self.poll_interval.is_zero() {
            return Err(WaitError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            initial_delay: Duration::ZERO,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
