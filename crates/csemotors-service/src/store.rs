//! The storage capabilities the review services need.

use csemotors_core::traits::RowFetcher;
use csemotors_entity::analytics::{ComparativeRating, DashboardRow};
use csemotors_entity::moderation::ModeratedReview;
use csemotors_entity::review::{ReviewListing, VehicleReview, VehicleReviewStats};
use csemotors_entity::sentiment::SentimentRow;

/// An executor that can decode every review row type.
pub trait ReviewStore:
    RowFetcher<ReviewListing>
    + RowFetcher<DashboardRow>
    + RowFetcher<SentimentRow>
    + RowFetcher<ComparativeRating>
    + RowFetcher<VehicleReviewStats>
    + RowFetcher<VehicleReview>
    + RowFetcher<ModeratedReview>
{
}

impl<T> ReviewStore for T where
    T: RowFetcher<ReviewListing>
        + RowFetcher<DashboardRow>
        + RowFetcher<SentimentRow>
        + RowFetcher<ComparativeRating>
        + RowFetcher<VehicleReviewStats>
        + RowFetcher<VehicleReview>
        + RowFetcher<ModeratedReview>
{
}
