use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogFlags {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
}

impl LogFlags {
    /// Level forced by command-line flags, if any. `--trace` wins over
    /// `--verbose`, which wins over `--quiet`.
    #[must_use]
    pub const fn level(self) -> Option<&'static str> {
        if self.trace || self.verbose > 1 {
            Some("trace")
        } else if self.verbose == 1 {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

/// Flags, then configured level (`ECO9_LOG_LEVEL` included), then
/// `RUST_LOG`, then `warn`.
pub fn build_filter(flags: LogFlags, config: &LogConfig) -> EnvFilter {
    if let Some(level) = flags.level() {
        return EnvFilter::new(level);
    }
    if let Some(level) = config.level.as_deref() {
        match EnvFilter::try_new(level) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("ignoring invalid log level `{level}`: {err}"),
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// machine-readable. A second call is a no-op.
pub fn init_tracing(flags: LogFlags, config: &LogConfig) {
    let filter = build_filter(flags, config);
    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
