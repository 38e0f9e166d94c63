//! Mathematical utilities: order statistics over per-share amounts.

pub mod stats;

pub use stats::*;
