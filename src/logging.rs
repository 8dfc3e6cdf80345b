//! Diagnostics output for the `pahakia` tool and host programs.
//!
//! The library itself only emits `tracing` events: the dispatcher reports
//! each protected execution's phase, and the catalog reports what it
//! loads. This module installs a `tracing-subscriber` formatter that writes
//! those events to stderr, honouring `RUST_LOG` when it is set.

use tracing_subscriber::{fmt, EnvFilter};

use crate::fault::{Fault, ResultExt};

/// Verbosity of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Every dispatcher phase transition.
    Trace,
    /// Handled and propagated faults, catalog registrations.
    Debug,
    /// Catalog loads.
    Info,
    /// Rejected handler registrations (default).
    #[default]
    Warn,
    /// Errors only.
    Error,
    /// Nothing.
    Off,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl From<u8> for LogLevel {
    /// Maps a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    fn from(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// Whether to include timestamps.
    pub with_timestamps: bool,
    /// Whether to include the target (module path).
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            with_timestamps: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set whether to include timestamps.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.with_timestamps = enabled;
        self
    }

    /// Set whether to include the target.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Settings for a `-v` count.
    pub fn from_verbosity(verbosity: u8) -> Self {
        Self::default().with_level(LogLevel::from(verbosity))
    }

    fn filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.level.directive())
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns a naturalized fault if a global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> Result<(), Fault> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    if config.with_timestamps {
        tracing::subscriber::set_global_default(subscriber.finish()).naturalize()
    } else {
        tracing::subscriber::set_global_default(subscriber.without_time().finish()).naturalize()
    }
}
