//! Flow resolver timing configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs for the bootstrap sequence and profile finalization.
///
/// All values are milliseconds so the TOML stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Minimum time the splash stays up, however fast data loads.
    pub min_splash_ms: u64,

    /// Minimum duration of the interactive loading phase. `None` disables the
    /// phase: splash goes straight to ready.
    pub interactive_loading_floor_ms: Option<u64>,

    /// Upper bound for session validation and, separately, account hydration.
    pub bootstrap_timeout_ms: u64,

    /// Extra validation attempts after a transient network failure.
    pub validation_retries: u32,

    pub validation_retry_delay_ms: u64,

    /// Minimum time the "completing" indicator is shown on finalization.
    pub completion_floor_ms: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            min_splash_ms: 2_000,
            interactive_loading_floor_ms: None,
            bootstrap_timeout_ms: 10_000,
            validation_retries: 2,
            validation_retry_delay_ms: 2_000,
            completion_floor_ms: 500,
        }
    }
}

impl FlowConfig {
    pub fn min_splash(&self) -> Duration {
        Duration::from_millis(self.min_splash_ms)
    }

    pub fn interactive_loading_floor(&self) -> Option<Duration> {
        self.interactive_loading_floor_ms.map(Duration::from_millis)
    }

    pub fn bootstrap_timeout(&self) -> Duration {
        Duration::from_millis(self.bootstrap_timeout_ms)
    }

    pub fn validation_retry_delay(&self) -> Duration {
        Duration::from_millis(self.validation_retry_delay_ms)
    }

    pub fn completion_floor(&self) -> Duration {
        Duration::from_millis(self.completion_floor_ms)
    }
}
