use tracing_subscriber::EnvFilter;

/// Initialize tracing for a tool binary. Honours `RUST_LOG`, defaults to `info`.
/// Logs go to stderr so JSON on stdout stays clean.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}
