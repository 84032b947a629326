use tracing_subscriber::EnvFilter;

/// Log to stderr so command output on stdout stays clean. `RUST_LOG` overrides the `warn` default.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
