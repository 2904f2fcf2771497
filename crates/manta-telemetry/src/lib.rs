//! Structured logging setup for Manta node processes.
//!
//! Kept to the `tracing`/`tracing-subscriber` core only: unlike a full node
//! service, nothing here exports metrics or traces to a collector.

mod config;

pub use config::TelemetryConfig;

/// Installs a global `tracing` subscriber built from `config`.
///
/// Must be called at most once per process, before any other `tracing`
/// calls are made.
pub fn init_tracing(config: &TelemetryConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
