//! Input documents for the engine.
//!
//! - `companyfacts`: the structured fact document produced by the fetch
//!   collaborator, read here from disk (fetching it is not this crate's job)
//! - `sample`: deterministic synthetic fact sets for demos and tests

pub mod companyfacts;
pub mod sample;

pub use companyfacts::*;
pub use sample::*;
