//! Command implementations

mod filter;
mod report;

pub use filter::{FilterOptions, run_filter};
