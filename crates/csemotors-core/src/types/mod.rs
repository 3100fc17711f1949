//! Core type definitions used across the workspace.

pub mod id;
pub mod pagination;
pub mod sorting;
pub mod value;

pub use id::*;
pub use pagination::{PageRequest, PageResponse, Pagination};
pub use sorting::SortDirection;
pub use value::SqlValue;
