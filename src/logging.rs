//! Diagnostic logging setup for the `agif` binary

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is unset
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "animgif=warn",
        1 => "animgif=info",
        2 => "animgif=debug",
        _ => "animgif=trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` takes precedence over `verbosity`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
