//! Diagnostic tracing, enabled with `RUST_LOG` (e.g. `RUST_LOG=scour=debug`).
//!
//! Progress lines are printed directly; this only covers the extra detail
//! (classification, placeholder counts, sizes) useful when a file comes out
//! unexpectedly.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber if `RUST_LOG` is set. Otherwise do nothing.
pub fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
