//! Newtype wrappers around the `SERIAL` primary keys of the dealership
//! tables.
//!
//! Using distinct types prevents accidentally passing a `VehicleId` where a
//! `ReviewId` is expected. When the `sqlx` feature is enabled, each ID type
//! also implements `sqlx::Type`, `sqlx::Encode`, and `sqlx::Decode` for
//! PostgreSQL `INTEGER` columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::value::SqlValue;

/// Macro to define a newtype ID wrapper around `i32`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Create an identifier from a raw integer, rejecting anything
            /// that cannot be a `SERIAL` key (zero, negative, or wider than
            /// `INTEGER`).
            pub fn from_raw(raw: i64) -> Option<Self> {
                i32::try_from(raw).ok().filter(|v| *v > 0).map(Self)
            }

            /// Return the inner integer value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl From<$name> for SqlValue {
            fn from(id: $name) -> SqlValue {
                SqlValue::Integer(i64::from(id.0))
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i32 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i32 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Primary key of a `review` row.
    ReviewId
);

define_id!(
    /// Primary key of an `inventory` row (a vehicle).
    VehicleId
);

define_id!(
    /// Primary key of an `account` row.
    AccountId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_non_serial_values() {
        assert_eq!(ReviewId::from_raw(7), Some(ReviewId(7)));
        assert_eq!(ReviewId::from_raw(0), None);
        assert_eq!(ReviewId::from_raw(-3), None);
        assert_eq!(ReviewId::from_raw(i64::from(i32::MAX) + 1), None);
    }

    #[test]
    fn test_parse_and_display() {
        let id: VehicleId = " 42 ".parse().unwrap();
        assert_eq!(id, VehicleId(42));
        assert_eq!(id.to_string(), "42");
        assert!("forty".parse::<VehicleId>().is_err());
    }

    #[test]
    fn test_binds_as_integer() {
        assert_eq!(SqlValue::from(AccountId(9)), SqlValue::Integer(9));
    }
}
