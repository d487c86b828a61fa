//! Telemetry infrastructure
//!
//! Installs the process-wide `tracing` subscriber. Every component logs
//! through `tracing` macros; nothing is emitted until the binary calls
//! [`init_telemetry`].

mod logging;

pub use logging::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
