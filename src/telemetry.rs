//! Opt-in tracing setup for editor hosts.
//!
//! Store, layout and transport events are emitted under the `chart_editor`
//! target. Hosts with their own subscriber need nothing from this module.

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "chart_editor=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, else [`DEFAULT_LOG_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_LOG_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
