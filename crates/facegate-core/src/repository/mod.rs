//! Repository trait definitions ("ports") implemented by facegate-infra.

pub mod attendance;
pub mod employee;
