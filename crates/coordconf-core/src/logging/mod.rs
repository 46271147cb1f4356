//! Logging abstractions
//!
//! Providers hold a [`Logger`]; the default one forwards to `tracing`.
//! Call [`init_tracing`] once at startup to see that output.

mod traits;
mod noop;
mod tracing_logger;
mod subscriber;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use tracing_logger::TracingLogger;
pub use subscriber::{init_tracing, LOG_ENV_VAR};
