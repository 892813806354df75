//! Process-wide log subscriber setup

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber once at process start.
///
/// `RUST_LOG` takes precedence over `default_directive`. Output goes to
/// stderr so stdout stays free for results. Calling this twice is a no-op.
pub fn init(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
