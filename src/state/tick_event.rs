//! Tick notifications broadcast by the gesture host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One invocation of the held gesture's action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickEvent {
    /// 1-based position within the current hold
    pub sequence: u64,
    pub at: DateTime<Utc>,
}

impl TickEvent {
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            at: Utc::now(),
        }
    }
}
