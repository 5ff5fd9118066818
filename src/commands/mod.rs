//! Command implementations for gcov-filter.

pub mod filter;

pub use filter::{FilterCommand, FilterStats};
