//! `tracing` wiring for binaries, tests, and benches.
//!
//! The checker itself only emits `tracing` events; it never installs a
//! subscriber. Anything that wants human-readable or filtered output
//! (a test harness, a bench, an embedding CLI) calls [`init`] once.

use tracing_subscriber::EnvFilter;

/// Install a process-wide `tracing` subscriber reading `RUST_LOG`
/// (default: `warn`). Safe to call more than once — later calls are
/// no-ops, matching `tracing_subscriber`'s own guidance.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
