//! Output writers for processed ledgers.

pub mod export;

pub use export::*;
