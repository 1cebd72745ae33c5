//! cvgen-core
//!
//! Pure domain types for the CV export pipeline: the CV data model, physical
//! page geometry, export formats and artifact naming conventions.
//! No imaging or PDF dependency; this is the shared vocabulary of the system.

pub mod error;
pub mod filenames;
pub mod format;
pub mod geometry;
pub mod models;
