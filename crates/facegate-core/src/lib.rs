//! Business logic and port definitions for Facegate.
//!
//! This crate holds the match decision policy (the one piece of real
//! decision logic in the system) and the "ports" the infrastructure layer
//! implements: the face encoder, the repositories, and the password hasher.
//! It depends only on `facegate-types` -- never on `facegate-infra` or any
//! database/HTTP crate.

pub mod encoder;
pub mod matching;
pub mod repository;
pub mod service;
