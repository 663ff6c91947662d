//! Observability setup for Facegate.

pub mod tracing_setup;
