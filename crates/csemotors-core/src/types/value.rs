//! Bound parameter values for dynamically assembled SQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamic query parameter that can represent the SQL types the review
/// queries bind.
///
/// Values of this type only ever travel as bound parameters; they are never
/// spliced into statement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// An integer value (`INT8`; compares cleanly against `INT4` columns).
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A timestamp value.
    Timestamp(DateTime<Utc>),
    /// A text value.
    Text(String),
    /// A text array (`TEXT[]`, used with `= ANY(...)`).
    TextList(Vec<String>),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

impl From<&[&str]> for SqlValue {
    fn from(value: &[&str]) -> Self {
        Self::TextList(value.iter().map(|s| s.to_string()).collect())
    }
}
