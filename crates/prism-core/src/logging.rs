//! Logging setup based on `tracing-subscriber`.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,prism_charts=debug,prism_mesh=debug";

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG` when present and falls back to [`DEFAULT_FILTER`].
/// Calling this more than once is harmless.
pub fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    init_with_filter(&filter);
}

/// Install the global subscriber with an explicit filter directive.
pub fn init_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_with_filter("warn");
        init_with_filter("debug");
        tracing::debug!("logging initialized twice");
    }
}
