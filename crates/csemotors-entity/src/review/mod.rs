//! Review domain entities.

pub mod filter;
pub mod model;
pub mod sort;

pub use filter::ReviewFilter;
pub use model::{ReviewListing, VehicleReview, VehicleReviewStats};
pub use sort::{ReviewSort, ReviewSortField};
