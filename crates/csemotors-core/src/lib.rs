//! # csemotors-core
//!
//! Core crate for the CSE Motors review back office. Contains the unified
//! error system, configuration schemas, typed identifiers, bound query
//! values, pagination/sorting types, and the storage executor traits.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
