//! Analysis modules.
//!
//! Filtering of the cleaned table and the aggregates computed from
//! the filtered result.

pub mod aggregator;
pub mod filter;

pub use aggregator::*;
pub use filter::{filter, FilterSelection};
