//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::tasks::RuntimeOptions;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "ring-timer")]
#[command(about = "A countdown timer service with a progress ring and looping alarm")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial preset hours
    #[arg(long, default_value = "0")]
    pub hours: u64,

    /// Initial preset minutes (clamped to 59)
    #[arg(long, default_value = "0")]
    pub minutes: u64,

    /// Sound file played when the countdown finishes
    #[arg(long, default_value = "sounds/ding.wav")]
    pub sound: PathBuf,

    /// Player command used to play the sound file
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Seconds the alarm may ring before it stops itself
    #[arg(long, default_value = "60")]
    pub alarm_secs: u64,

    /// Animation frame interval in milliseconds
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_ms: u64,

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

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timing options for the timer runtime
    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            frame_interval: Duration::from_millis(self.frame_ms),
            alarm_ceiling: Duration::from_secs(self.alarm_secs),
        }
    }
}
