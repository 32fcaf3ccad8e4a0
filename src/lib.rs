//! Repeat Gesture - A repeating timer for press-and-hold gesture actions
//! 
//! This library provides a timer that repeatedly invokes an action while a
//! gesture is held, plus a small HTTP host that drives one shared timer from
//! press and release events.

pub mod config;
pub mod gesture;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use gesture::{RepeatGesture, RepeatGestureTimer};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
