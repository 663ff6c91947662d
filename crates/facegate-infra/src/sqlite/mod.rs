//! SQLite persistence: pool management and repository implementations.

pub mod attendance;
pub mod employee;
pub mod pool;
