//! Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Log line format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing to stderr
///
/// Verbosity 0 honours `RUST_LOG` (default `warn`); 1 = info, 2 = debug,
/// 3+ = trace. Returns false if a subscriber was already installed.
pub fn init_logging(verbosity: u8, format: LogFormat) -> bool {
    let builder = fmt()
        .with_env_filter(filter_for(verbosity))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging(2, LogFormat::Text);
        assert!(!init_logging(2, LogFormat::Json));
    }
}
