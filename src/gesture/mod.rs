//! Gesture module
//!
//! This module contains the repeat timer and the press-and-hold gesture built on it.

pub mod repeat_gesture;
pub mod repeat_timer;

// Re-export main types
pub use repeat_gesture::RepeatGesture;
pub use repeat_timer::{RepeatGestureTimer, DEFAULT_REPEAT_INTERVAL, MIN_REPEAT_INTERVAL};
