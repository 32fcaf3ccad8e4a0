//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod hold_watchdog;
pub mod tick_logger;

// Re-export main functions
pub use hold_watchdog::hold_watchdog_task;
pub use tick_logger::tick_logger_task;
