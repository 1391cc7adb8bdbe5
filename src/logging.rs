//! Tracing subscriber installation.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING_INSTALLED: Once = Once::new();

/// Installs a formatting subscriber as the global default (idempotent).
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` (for example
/// `"info"` or `"tidepool=debug"`) selects what is printed.
pub fn init_tracing(default_filter: &str) {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
        if result.is_err() {
            eprintln!("tidepool tracing subscriber failed to initialize");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_installation_is_harmless() {
        init_tracing("debug");
        init_tracing("trace");
        tracing::info!("logging installed");
    }
}
