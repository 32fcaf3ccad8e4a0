//! Timer state snapshot

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a repeat gesture timer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerState {
    pub active: bool,
    pub elapsed_ms: Option<u64>,
    pub repeat_interval_ms: u64,
    /// Wall-clock start of the current hold
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerState {
    /// Create an active timer state
    pub fn active(elapsed: Duration, repeat_interval: Duration, started_at: DateTime<Utc>) -> Self {
        Self {
            active: true,
            elapsed_ms: Some(millis(elapsed)),
            repeat_interval_ms: millis(repeat_interval),
            started_at: Some(started_at),
        }
    }

    /// Create an inactive timer state
    pub fn inactive(repeat_interval: Duration) -> Self {
        Self {
            active: false,
            elapsed_ms: None,
            repeat_interval_ms: millis(repeat_interval),
            started_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_state_has_no_elapsed() {
        let state = TimerState::inactive(Duration::from_millis(400));
        assert!(!state.is_active());
        assert_eq!(state.elapsed_ms, None);
        assert_eq!(state.repeat_interval_ms, 400);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let started_at = Utc::now();
        let state = TimerState::active(
            Duration::from_millis(1250),
            Duration::from_millis(400),
            started_at,
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["elapsed_ms"], 1250);
        assert_eq!(json["repeat_interval_ms"], 400);
        assert!(json["started_at"].is_string());
    }
}
