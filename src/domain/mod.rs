//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input facts as the fetch collaborator hands them over (`RawFact`)
//! - the engine's working representation (`DividendCandidate`)
//! - the terminal output record (`DividendEvent`) plus run counters
//! - engine configuration and per-company overrides

pub mod types;

pub use types::*;
