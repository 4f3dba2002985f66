//! Log output for the command line tool.

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a global `tracing` subscriber that writes to stderr.
///
/// `verbosity` counts `-v` flags: 0 logs warnings and errors, 1 adds info and
/// 2 or more adds debug. If `RUST_LOG` is set it takes precedence.
///
/// Calling this more than once has no further effect.
pub fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .try_init();

    if let Err(error) = result {
        tracing::debug!("Logging was already set up: {error}");
    }
}
