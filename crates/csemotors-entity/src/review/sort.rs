//! Sort options for the advanced review listing.

use serde::{Deserialize, Serialize};

use csemotors_core::types::SortDirection;

/// The allow-listed sort columns.
///
/// This is the only path by which request input influences identifier
/// text in a review query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSortField {
    /// `review_date` (the default).
    #[default]
    ReviewDate,
    /// `review_rating`.
    ReviewRating,
    /// `review_title`.
    ReviewTitle,
    /// `inv_make`.
    InvMake,
    /// `inv_model`.
    InvModel,
}

impl ReviewSortField {
    /// Every allowed sort field.
    pub const ALL: [Self; 5] = [
        Self::ReviewDate,
        Self::ReviewRating,
        Self::ReviewTitle,
        Self::InvMake,
        Self::InvModel,
    ];

    /// The request-facing name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReviewDate => "review_date",
            Self::ReviewRating => "review_rating",
            Self::ReviewTitle => "review_title",
            Self::InvMake => "inv_make",
            Self::InvModel => "inv_model",
        }
    }

    /// The qualified column the field sorts by.
    pub fn column(&self) -> &'static str {
        match self {
            Self::ReviewDate => "r.review_date",
            Self::ReviewRating => "r.review_rating",
            Self::ReviewTitle => "r.review_title",
            Self::InvMake => "i.inv_make",
            Self::InvModel => "i.inv_model",
        }
    }

    /// Resolve an untrusted sort name against the allow-list, falling back
    /// to [`ReviewSortField::ReviewDate`] for anything unrecognized.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|name| Self::ALL.into_iter().find(|field| field.as_str() == name))
            .unwrap_or_default()
    }
}

/// Raw sort request as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSort {
    /// Requested sort field name.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Requested sort order (`ASC`/`DESC`).
    #[serde(default)]
    pub sort_order: Option<String>,
}

impl ReviewSort {
    /// Create a sort request from raw strings.
    pub fn new(sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        Self {
            sort_by: Some(sort_by.into()),
            sort_order: Some(sort_order.into()),
        }
    }

    /// The allow-listed field this request resolves to.
    pub fn field(&self) -> ReviewSortField {
        ReviewSortField::parse_lenient(self.sort_by.as_deref())
    }

    /// The normalized direction this request resolves to.
    pub fn direction(&self) -> SortDirection {
        SortDirection::parse_lenient(self.sort_order.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_names_resolve() {
        for field in ReviewSortField::ALL {
            assert_eq!(ReviewSortField::parse_lenient(Some(field.as_str())), field);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_review_date() {
        for raw in ["", "REVIEW_RATING", "review_id; DROP TABLE review;", "1"] {
            assert_eq!(
                ReviewSortField::parse_lenient(Some(raw)),
                ReviewSortField::ReviewDate,
                "{raw:?}"
            );
        }
        assert_eq!(ReviewSortField::parse_lenient(None), ReviewSortField::ReviewDate);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let sort = ReviewSort::default();
        assert_eq!(sort.field(), ReviewSortField::ReviewDate);
        assert_eq!(sort.direction(), SortDirection::Desc);
    }
}
