//! Cryptographic adapters.

pub mod password;
