//! Infrastructure layer for Facegate.
//!
//! Contains implementations of the ports defined in `facegate-core`:
//! SQLite storage, Argon2id password hashing, the HTTP face-encoder
//! client, and image payload decoding.

pub mod config;
pub mod crypto;
pub mod encoder;
pub mod media;
pub mod sqlite;
