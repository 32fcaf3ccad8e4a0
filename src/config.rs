//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "repeat-gesture")]
#[command(about = "A gesture host that repeats an action while a press is held")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Time between repeats of a held gesture, in milliseconds
    #[arg(short, long, default_value = "400", value_parser = clap::value_parser!(u64).range(10..))]
    pub interval_ms: u64,

    /// Release holds lasting longer than this many seconds (0 disables)
    #[arg(short, long, default_value = "30")]
    pub max_hold_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_hold(&self) -> Option<Duration> {
        (self.max_hold_secs > 0).then(|| Duration::from_secs(self.max_hold_secs))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
