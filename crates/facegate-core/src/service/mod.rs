//! Services composing the ports into request-level flows.

pub mod attendance;
pub mod auth;
pub mod employee;
pub mod hash;
pub mod recognition;
