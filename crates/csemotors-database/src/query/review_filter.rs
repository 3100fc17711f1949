//! Compiles a review filter, sort, and page request into a parameterized
//! listing query.
//!
//! The compiled query serves two statements: a `COUNT(*)` over the filtered
//! join and the page of rows itself. Both share one WHERE clause; the data
//! statement appends `ORDER BY` and a bound `LIMIT`/`OFFSET`, which are
//! always the last two parameters.

use csemotors_core::types::{PageRequest, SqlValue};
use csemotors_entity::review::{ReviewFilter, ReviewSort};

use super::builder::WhereBuilder;

/// The review/account/inventory join every listing statement reads from.
pub const REVIEW_JOIN: &str = "FROM review r \
     JOIN account a ON r.account_id = a.account_id \
     JOIN inventory i ON r.inv_id = i.inv_id";

/// Columns of a `ReviewListing` row.
pub const LISTING_COLUMNS: &str = "r.review_id, r.inv_id, r.account_id, r.review_title, \
     r.review_text, r.review_rating, r.review_date, r.review_approved, \
     a.account_firstname, a.account_lastname, \
     i.inv_make, i.inv_model, i.inv_year, i.inv_color";

/// Columns a search term is matched against.
const SEARCH_COLUMNS: [&str; 4] = [
    "r.review_title",
    "r.review_text",
    "a.account_firstname",
    "a.account_lastname",
];

/// A compiled listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledReviewQuery {
    where_clause: String,
    order_by: String,
    limit_offset: String,
    params: Vec<SqlValue>,
    page: PageRequest,
}

impl CompiledReviewQuery {
    /// The `WHERE ...` clause (never empty: the rating range always applies).
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    /// The `ORDER BY ...` clause, built from allow-listed identifiers only.
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// The `LIMIT $n OFFSET $m` clause.
    pub fn limit_offset(&self) -> &str {
        &self.limit_offset
    }

    /// Parameters of the data statement.
    pub fn data_params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Parameters of the count statement: the data parameters without the
    /// trailing limit and offset.
    pub fn count_params(&self) -> &[SqlValue] {
        &self.params[..self.params.len().saturating_sub(2)]
    }

    /// The page this query selects.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// `SELECT COUNT(*)` over the filtered join.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) {REVIEW_JOIN} {}", self.where_clause)
    }

    /// The page of listing rows.
    pub fn data_sql(&self) -> String {
        format!(
            "SELECT {LISTING_COLUMNS} {REVIEW_JOIN} {} {} {}",
            self.where_clause, self.order_by, self.limit_offset
        )
    }
}

/// Compile a listing query.
///
/// Predicates are added in a fixed order: rating range, date from, date to,
/// approval status, make, model, search term. Malformed input never fails;
/// it degrades to the documented defaults.
pub fn compile(filter: &ReviewFilter, sort: &ReviewSort, page: PageRequest) -> CompiledReviewQuery {
    let (rating_min, rating_max) = filter.rating_bounds();

    let mut builder = WhereBuilder::new();
    builder
        .push(|p| {
            let min = p.bind(rating_min);
            let max = p.bind(rating_max);
            format!("r.review_rating BETWEEN {min} AND {max}")
        })
        .push_if(filter.date_from, |p, from| {
            format!("r.review_date >= {}", p.bind(from))
        })
        .push_if(filter.date_to, |p, to| {
            format!("r.review_date <= {}", p.bind(to))
        })
        .push_if(filter.approved_status, |p, approved| {
            format!("r.review_approved = {}", p.bind(approved))
        })
        .push_if(filter.make(), |p, make| {
            format!("LOWER(i.inv_make) = LOWER({})", p.bind(make))
        })
        .push_if(filter.model(), |p, model| {
            format!("LOWER(i.inv_model) = LOWER({})", p.bind(model))
        })
        .push_if(filter.search_term(), |p, term| {
            // One bound pattern, referenced by every column comparison.
            let pattern = p.bind(format!("%{term}%"));
            let matches = SEARCH_COLUMNS
                .iter()
                .map(|column| format!("LOWER({column}) LIKE LOWER({pattern})"))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({matches})")
        });

    let (where_clause, mut params) = builder.into_parts();

    let order_by = format!(
        "ORDER BY {} {}",
        sort.field().column(),
        sort.direction().as_sql()
    );

    let limit = params.bind(page.limit());
    let offset = params.bind(page.offset());
    let limit_offset = format!("LIMIT {limit} OFFSET {offset}");

    CompiledReviewQuery {
        where_clause,
        order_by,
        limit_offset,
        params: params.into_vec(),
        page,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{TimeZone, Utc};

    use super::*;

    /// Every distinct `$n` placeholder in `sql`.
    fn placeholders(sql: &str) -> BTreeSet<usize> {
        let bytes = sql.as_bytes();
        let mut found = BTreeSet::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    found.insert(sql[start..end].parse().unwrap());
                }
                i = end;
            } else {
                i += 1;
            }
        }
        found
    }

    /// The placeholder number that directly follows `prefix` in `sql`.
    fn placeholder_after(sql: &str, prefix: &str) -> usize {
        let start = sql.find(prefix).unwrap_or_else(|| panic!("{prefix:?} not in {sql}"))
            + prefix.len();
        let digits: String = sql[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap()
    }

    fn filter_for_mask(mask: u32) -> ReviewFilter {
        let bit = |n: u32| mask & (1 << n) != 0;
        let mut filter = ReviewFilter::default();
        if bit(0) {
            filter.rating_min = 2;
            filter.rating_max = 4;
        }
        if bit(1) {
            filter.date_from = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        }
        if bit(2) {
            filter.date_to = Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
        }
        if bit(3) {
            filter.approved_status = Some(false);
        }
        if bit(4) {
            filter.make = Some("Jeep".to_string());
        }
        if bit(5) {
            filter.model = Some("Wrangler".to_string());
        }
        if bit(6) {
            filter.search_term = Some("smooth".to_string());
        }
        filter
    }

    #[test]
    fn test_placeholders_align_with_params_for_every_filter_combination() {
        let page = PageRequest::new(2, 10);
        for mask in 0..128_u32 {
            let filter = filter_for_mask(mask);
            let compiled = compile(&filter, &ReviewSort::default(), page);
            let params = compiled.data_params();

            let optional = (1..7).filter(|n| mask & (1 << n) != 0).count();
            assert_eq!(params.len(), 2 + optional + 2, "mask {mask:#09b}");

            let expected: BTreeSet<usize> = (1..=params.len()).collect();
            assert_eq!(placeholders(&compiled.data_sql()), expected, "mask {mask:#09b}");

            let where_expected: BTreeSet<usize> = (1..=compiled.count_params().len()).collect();
            assert_eq!(
                placeholders(compiled.where_clause()),
                where_expected,
                "mask {mask:#09b}"
            );

            let sql = compiled.where_clause();
            let at = |n: usize| &params[n - 1];
            let min = placeholder_after(sql, "BETWEEN $");
            assert_eq!(at(min), &SqlValue::Integer(filter.rating_bounds().0.into()));
            assert_eq!(at(min + 1), &SqlValue::Integer(filter.rating_bounds().1.into()));
            if let Some(from) = filter.date_from {
                assert_eq!(at(placeholder_after(sql, "r.review_date >= $")), &SqlValue::Timestamp(from));
            }
            if let Some(to) = filter.date_to {
                assert_eq!(at(placeholder_after(sql, "r.review_date <= $")), &SqlValue::Timestamp(to));
            }
            if let Some(approved) = filter.approved_status {
                assert_eq!(
                    at(placeholder_after(sql, "r.review_approved = $")),
                    &SqlValue::Boolean(approved)
                );
            }
            if filter.make.is_some() {
                assert_eq!(
                    at(placeholder_after(sql, "LOWER(i.inv_make) = LOWER($")),
                    &SqlValue::Text("Jeep".into())
                );
            }
            if filter.model.is_some() {
                assert_eq!(
                    at(placeholder_after(sql, "LOWER(i.inv_model) = LOWER($")),
                    &SqlValue::Text("Wrangler".into())
                );
            }
            if filter.search_term.is_some() {
                assert_eq!(
                    at(placeholder_after(sql, "LOWER(r.review_title) LIKE LOWER($")),
                    &SqlValue::Text("%smooth%".into())
                );
            }
        }
    }

    #[test]
    fn test_count_params_drop_exactly_limit_and_offset() {
        let page = PageRequest::new(3, 25);
        for mask in 0..128_u32 {
            let compiled = compile(&filter_for_mask(mask), &ReviewSort::default(), page);
            let data = compiled.data_params();
            let count = compiled.count_params();
            assert_eq!(count.len() + 2, data.len());
            assert_eq!(count, &data[..data.len() - 2]);
            assert_eq!(data[data.len() - 2], SqlValue::Integer(25));
            assert_eq!(data[data.len() - 1], SqlValue::Integer(50));
            assert!(!compiled.count_sql().contains("LIMIT"));
            assert!(!compiled.count_sql().contains("ORDER BY"));
        }
    }

    #[test]
    fn test_sort_injection_falls_back_to_review_date() {
        let sort = ReviewSort::new("review_id; DROP TABLE review;", "DESC");
        let compiled = compile(&ReviewFilter::default(), &sort, PageRequest::default());
        assert_eq!(compiled.order_by(), "ORDER BY r.review_date DESC");
        assert!(!compiled.data_sql().contains("DROP TABLE"));
        assert!(!compiled.count_sql().contains("DROP TABLE"));
    }

    #[test]
    fn test_sort_order_normalization() {
        let asc = compile(
            &ReviewFilter::default(),
            &ReviewSort::new("inv_make", "asc"),
            PageRequest::default(),
        );
        assert_eq!(asc.order_by(), "ORDER BY i.inv_make ASC");

        let other = compile(
            &ReviewFilter::default(),
            &ReviewSort::new("review_rating", "ASC; --"),
            PageRequest::default(),
        );
        assert_eq!(other.order_by(), "ORDER BY r.review_rating DESC");
    }

    #[test]
    fn test_search_term_is_one_or_group_over_four_columns() {
        let filter = ReviewFilter {
            search_term: Some("Smooth".to_string()),
            ..ReviewFilter::default()
        };
        let compiled = compile(&filter, &ReviewSort::default(), PageRequest::default());

        assert_eq!(
            compiled.where_clause(),
            "WHERE r.review_rating BETWEEN $1 AND $2 AND (\
             LOWER(r.review_title) LIKE LOWER($3) OR \
             LOWER(r.review_text) LIKE LOWER($3) OR \
             LOWER(a.account_firstname) LIKE LOWER($3) OR \
             LOWER(a.account_lastname) LIKE LOWER($3))"
        );
        assert_eq!(compiled.where_clause().matches(" OR ").count(), 3);
        assert_eq!(compiled.count_params()[2], SqlValue::Text("%Smooth%".into()));
    }

    #[test]
    fn test_default_query_binds_limit_and_offset() {
        let compiled = compile(
            &ReviewFilter::default(),
            &ReviewSort::default(),
            PageRequest::default(),
        );
        assert_eq!(compiled.where_clause(), "WHERE r.review_rating BETWEEN $1 AND $2");
        assert_eq!(compiled.limit_offset(), "LIMIT $3 OFFSET $4");
        assert_eq!(
            compiled.data_params(),
            &[
                SqlValue::Integer(1),
                SqlValue::Integer(5),
                SqlValue::Integer(20),
                SqlValue::Integer(0),
            ]
        );
        assert!(compiled.data_sql().ends_with("ORDER BY r.review_date DESC LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn test_blank_strings_add_no_predicates() {
        let filter = ReviewFilter {
            make: Some(String::new()),
            model: Some("   ".to_string()),
            search_term: Some(String::new()),
            ..ReviewFilter::default()
        };
        let compiled = compile(&filter, &ReviewSort::default(), PageRequest::default());
        assert_eq!(compiled.count_params().len(), 2);
    }
}
