//! Diagnostic channel setup.
//!
//! Extraction fallbacks and storage failures are reported here and nowhere else:
//! the search feature never surfaces them to the person typing.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call multiple times.
///
/// Writes to stderr so that CLI output on stdout stays machine-readable. Under a
/// test runner the level drops to DEBUG and output goes through the test writer.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let filter = EnvFilter::from_default_env().add_directive(level.into());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        let result = if is_test {
            builder.with_test_writer().try_init()
        } else {
            builder.with_writer(std::io::stderr).try_init()
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
