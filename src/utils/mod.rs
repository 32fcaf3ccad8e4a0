//! Utility functions module
//! 
//! Process-level helpers for the gesture host.

pub mod signals;

pub use signals::shutdown_signal;
