//! Face-encoder adapters.

pub mod remote;

pub use remote::RemoteFaceEncoder;
