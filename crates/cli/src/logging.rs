use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
///
/// Per-source failures already get a `tally:` line on stderr, so their `warn!`
/// records only show from `-v` on.
///
/// `log` records emitted by the engine are forwarded through the subscriber's
/// `tracing-log` bridge.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // errs only when a subscriber is already set
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
