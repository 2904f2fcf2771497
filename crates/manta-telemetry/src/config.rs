use std::env;

/// Logging configuration, read from the environment so a node can be
/// retuned without a rebuild.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `tracing-subscriber` `EnvFilter` directive, e.g. `manta_payproc=debug,info`.
    pub filter: String,
    /// Emit one JSON object per log line instead of the human-readable format.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Reads `MANTA_LOG` (filter directive) and `MANTA_LOG_JSON` (`"1"`/`"true"`),
    /// falling back to sensible defaults when unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            filter: env::var("MANTA_LOG").unwrap_or(defaults.filter),
            json: env::var("MANTA_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.json),
        }
    }
}
