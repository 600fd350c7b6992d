//! # waymem-observability
//!
//! Subscriber setup for binaries and the span macros that name pipeline stages.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, resolve_filter, LOG_ENV_VAR};
