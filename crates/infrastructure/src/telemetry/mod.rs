//! Logging initialization
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus either the
//! pretty or the JSON fmt layer. Output goes to stderr so command results on
//! stdout stay machine-readable.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
