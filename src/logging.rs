use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize structured JSON logging on stderr.
///
/// Defaults to `error` level unless overridden by `CUECRAFT_LOG`
/// (e.g. `CUECRAFT_LOG=cuecraft=debug` to see every cue break and timing adjustment).
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var("CUECRAFT_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::ERROR.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(true),
        )
        .try_init();
}
