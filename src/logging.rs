use tracing_subscriber::EnvFilter;

/// Initialise logging for an overlay session. The default level is `info`;
/// `debug` can be enabled via the settings file, in which case `RUST_LOG`
/// may override the filter.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` so a stray RUST_LOG in the environment cannot flood
        // the session with geometry traces.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
