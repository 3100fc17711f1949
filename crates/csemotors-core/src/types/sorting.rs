//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortDirection {
    /// Normalize an untrusted sort order.
    ///
    /// Only a case-insensitive `"ASC"` sorts ascending; anything else,
    /// including a missing value, sorts descending.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("ASC") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(SortDirection::parse_lenient(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("AsC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("DESC")), SortDirection::Desc);
        assert_eq!(
            SortDirection::parse_lenient(Some("ASC; DROP TABLE review")),
            SortDirection::Desc
        );
        assert_eq!(SortDirection::parse_lenient(None), SortDirection::Desc);
    }
}
