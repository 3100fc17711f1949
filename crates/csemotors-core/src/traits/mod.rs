//! Core traits defined in `csemotors-core` and implemented by other crates.

pub mod executor;

pub use executor::{RowFetcher, StatementExecutor};
