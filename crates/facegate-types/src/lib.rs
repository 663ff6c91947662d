//! Shared domain types for Facegate.
//!
//! This crate contains the core domain types used across the Facegate
//! service: Embedding, Employee, AttendanceRecord, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! secrecy.

pub mod attendance;
pub mod config;
pub mod embedding;
pub mod employee;
pub mod error;
