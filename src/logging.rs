//! Tracing subscriber setup for embedders.
//!
//! The core itself only emits `tracing` events; installing a subscriber is
//! the hosting process's job. These helpers wire up the common case: a
//! formatted subscriber filtered by `RUST_LOG` when set, otherwise by the
//! configured level.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, panicking if one is already set.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install the global subscriber, failing quietly if one is already set.
///
/// Useful for hosts (and tests) that may initialize logging more than once.
pub fn try_init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_twice_errors() {
        let first = try_init("debug");
        let second = try_init("debug");

        // The second install must fail without panicking.
        if first.is_ok() {
            assert!(second.is_err());
        }
    }
}
