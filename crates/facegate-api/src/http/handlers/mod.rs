//! REST API request handlers.

pub mod attendance;
pub mod auth;
pub mod employee;
pub mod enroll;
pub mod recap;
