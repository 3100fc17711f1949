//! # csemotors-database
//!
//! PostgreSQL connection management, the review query compiler, and the
//! concrete review repositories.
//!
//! Repositories are generic over the storage traits in
//! `csemotors_core::traits` and default to [`PgExecutor`]. Enable the
//! `testing` feature to get the recording [`testing::FakeExecutor`].

pub mod connection;
pub mod executor;
pub mod migration;
pub mod query;
pub mod repositories;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use connection::DatabasePool;
pub use executor::PgExecutor;
