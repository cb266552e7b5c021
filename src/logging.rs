use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
/// - Respects `RUST_LOG` if set
/// - Otherwise uses `fallback` (the configured `log_level`), then `info`
///
/// Returns `false` and reports on stderr when a subscriber is already set.
pub fn init_logging(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match fmt().with_env_filter(filter).try_init() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to install tracing subscriber: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported_not_panicking() {
        init_logging("debug");

        assert!(!init_logging("info"));
    }
}
