//! State management module
//! 
//! This module contains the shared host state and the snapshots it hands out.

pub mod app_state;
pub mod tick_event;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use tick_event::TickEvent;
pub use timer_state::TimerState;
