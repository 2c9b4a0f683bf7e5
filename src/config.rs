use std::time::Duration;

use serde::Deserialize;

use crate::global_variables::{
    CLEARANCE_INTERVAL_MS, PEDESTRIAN_BLINK_MS, PRESSURE_POLL_INTERVAL_MS, YELLOW_DURATION_MS,
};

/// Every hold and pause of an intersection, in milliseconds. Heads take the
/// yellow and blink holds, the controller takes the rest via `schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub yellow_ms: u64,
    pub pedestrian_blink_ms: u64,
    /// All-red gap between an outgoing and an incoming cycle.
    pub clearance_ms: u64,
    /// Pause between pressure checks while searching for a non-empty cycle.
    pub poll_interval_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            yellow_ms: YELLOW_DURATION_MS,
            pedestrian_blink_ms: PEDESTRIAN_BLINK_MS,
            clearance_ms: CLEARANCE_INTERVAL_MS,
            poll_interval_ms: PRESSURE_POLL_INTERVAL_MS,
        }
    }
}

impl Timings {
    pub fn yellow(&self) -> Duration {
        Duration::from_millis(self.yellow_ms)
    }

    pub fn pedestrian_blink(&self) -> Duration {
        Duration::from_millis(self.pedestrian_blink_ms)
    }

    pub fn schedule(&self) -> ScheduleTimings {
        ScheduleTimings {
            clearance_ms: self.clearance_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

/// Pauses the controller itself inserts while scheduling, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTimings {
    /// All-red gap between an outgoing and an incoming cycle.
    pub clearance_ms: u64,
    /// Pause between pressure checks while searching for a non-empty cycle.
    pub poll_interval_ms: u64,
}

impl Default for ScheduleTimings {
    fn default() -> Self {
        Timings::default().schedule()
    }
}

impl ScheduleTimings {
    pub fn clearance(&self) -> Duration {
        Duration::from_millis(self.clearance_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
