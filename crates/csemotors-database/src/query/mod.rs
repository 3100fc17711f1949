//! Injection-safe SQL assembly.
//!
//! Statement text is only ever built from fixed fragments and allow-listed
//! identifiers; every request-supplied value travels as a bound parameter.

pub mod builder;
pub mod review_filter;

pub use builder::{ParamList, WhereBuilder};
pub use review_filter::{CompiledReviewQuery, compile};
