use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FEEDBACK_LOG";

/// Installs a stderr subscriber filtered by `FEEDBACK_LOG` (default `info`).
///
/// Repeat calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
