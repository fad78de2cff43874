//! Structured logging for the dispatcher.
//!
//! The dispatcher only emits `tracing` events; the host application decides
//! where they go. [`init_subscriber`] is the stock stderr setup and
//! [`capture_logs`] records events in memory for tests.

pub mod capture;

pub use capture::{CapturedEvent, CapturedLogs, capture_logs};

/// Level used when neither the caller nor `RUST_LOG` specifies one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Only the first call
/// installs anything; later calls return `false`.
pub fn init_subscriber(level: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let level = if level.trim().is_empty() {
        DEFAULT_LEVEL
    } else {
        level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
