//! Review analytics dashboard and comparison models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use csemotors_core::types::VehicleId;

/// The single row produced by the dashboard query; every column is a JSON
/// aggregate that may be `NULL` when the review table is empty.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DashboardRow {
    pub stats: Option<serde_json::Value>,
    pub rating_dist: Option<serde_json::Value>,
    pub trends: Option<serde_json::Value>,
    pub top_vehicles: Option<serde_json::Value>,
}

/// Headline review counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_reviews: i64,
    pub approved_reviews: i64,
    pub pending_reviews: i64,
    #[serde(default)]
    pub overall_avg_rating: Option<f64>,
    pub unique_reviewers: i64,
    pub vehicles_with_reviews: i64,
}

/// Share of approved reviews carrying one star rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub review_rating: i32,
    pub count: i64,
    pub percentage: f64,
}

/// Review volume and average rating for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: DateTime<Utc>,
    pub review_count: i64,
    pub avg_rating: f64,
}

/// A vehicle ranked by its approved review count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopVehicle {
    pub inv_id: VehicleId,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: i32,
    pub review_count: i64,
    pub avg_rating: f64,
}

/// Everything the analytics dashboard renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewDashboard {
    pub stats: ReviewStats,
    pub rating_distribution: Vec<RatingBucket>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub top_vehicles: Vec<TopVehicle>,
}

impl ReviewDashboard {
    /// Decode the JSON aggregates of a dashboard row. `NULL` aggregates
    /// become zero stats or empty lists.
    pub fn from_row(row: DashboardRow) -> Result<Self, serde_json::Error> {
        Ok(Self {
            stats: decode_or_default(row.stats)?,
            rating_distribution: decode_or_default(row.rating_dist)?,
            monthly_trends: decode_or_default(row.trends)?,
            top_vehicles: decode_or_default(row.top_vehicles)?,
        })
    }
}

fn decode_or_default<T>(value: Option<serde_json::Value>) -> Result<T, serde_json::Error>
where
    T: Default + serde::de::DeserializeOwned,
{
    match value {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value),
    }
}

/// How a vehicle's average compares with its make's average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MakeComparison {
    AboveAverage,
    BelowAverage,
    Average,
}

impl MakeComparison {
    /// Return the comparison as the label the query produces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AboveAverage => "above_average",
            Self::BelowAverage => "below_average",
            Self::Average => "average",
        }
    }
}

// Decoded from the `TEXT` produced by the comparison `CASE` expression.
impl sqlx::Type<sqlx::Postgres> for MakeComparison {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MakeComparison {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        match <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)? {
            "above_average" => Ok(Self::AboveAverage),
            "below_average" => Ok(Self::BelowAverage),
            "average" => Ok(Self::Average),
            other => Err(format!("unknown make comparison '{other}'").into()),
        }
    }
}

/// Approved-review statistics of one vehicle compared with its make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ComparativeRating {
    pub inv_id: VehicleId,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: i32,
    pub review_count: i64,
    pub avg_rating: f64,
    pub min_rating: i32,
    pub max_rating: i32,
    pub mode_rating: i32,
    pub make_avg_rating: f64,
    pub performance_vs_make: MakeComparison,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_row_decodes_to_zeroes() {
        let dashboard = ReviewDashboard::from_row(DashboardRow {
            stats: None,
            rating_dist: None,
            trends: Some(serde_json::Value::Null),
            top_vehicles: None,
        })
        .unwrap();
        assert_eq!(dashboard, ReviewDashboard::default());
    }

    #[test]
    fn test_populated_row_decodes() {
        let dashboard = ReviewDashboard::from_row(DashboardRow {
            stats: Some(json!({
                "total_reviews": 3,
                "approved_reviews": 2,
                "pending_reviews": 1,
                "overall_avg_rating": 4.33,
                "unique_reviewers": 2,
                "vehicles_with_reviews": 1
            })),
            rating_dist: Some(json!([
                { "review_rating": 5, "count": 1, "percentage": 50.0 },
                { "review_rating": 4, "count": 1, "percentage": 50.0 }
            ])),
            trends: Some(json!([
                { "month": "2024-05-01T00:00:00+00:00", "review_count": 3, "avg_rating": 4.33 }
            ])),
            top_vehicles: Some(json!([
                {
                    "inv_id": 1, "inv_make": "Jeep", "inv_model": "Wrangler",
                    "inv_year": 2019, "review_count": 2, "avg_rating": 4.5
                }
            ])),
        })
        .unwrap();

        assert_eq!(dashboard.stats.pending_reviews, 1);
        assert_eq!(dashboard.rating_distribution.len(), 2);
        assert_eq!(dashboard.monthly_trends[0].review_count, 3);
        assert_eq!(dashboard.top_vehicles[0].inv_id, VehicleId(1));
    }
}
