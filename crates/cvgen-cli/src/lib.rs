//! cvgen-cli library root.
//!
//! Re-exports the config layer so integration tests can exercise loading
//! and migration without going through the binary.

pub mod config;
