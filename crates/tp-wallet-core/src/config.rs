use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed delays of the UI choreography, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timings {
    pub toast_window_ms: u64,
    pub demo_connect_delay_ms: u64,
    pub demo_scan_delay_ms: u64,
    pub demo_approval_delay_ms: u64,
    pub card_pulse_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            toast_window_ms: 3_000,
            demo_connect_delay_ms: 1_200,
            demo_scan_delay_ms: 5_000,
            demo_approval_delay_ms: 2_000,
            card_pulse_ms: 600,
        }
    }
}

impl Timings {
    pub fn toast_window(&self) -> Duration {
        Duration::from_millis(self.toast_window_ms)
    }

    pub fn demo_connect_delay(&self) -> Duration {
        Duration::from_millis(self.demo_connect_delay_ms)
    }

    pub fn demo_scan_delay(&self) -> Duration {
        Duration::from_millis(self.demo_scan_delay_ms)
    }

    pub fn demo_approval_delay(&self) -> Duration {
        Duration::from_millis(self.demo_approval_delay_ms)
    }

    pub fn card_pulse(&self) -> Duration {
        Duration::from_millis(self.card_pulse_ms)
    }
}
