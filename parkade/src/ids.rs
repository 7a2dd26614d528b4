//! Strongly typed row identifiers.
//!
//! Every persisted entity is keyed by an `INTEGER PRIMARY KEY`. Wrapping the
//! raw `i64` in a distinct type per entity keeps a spot id from being passed
//! where a floor id is expected, and lets the ids flow through `rusqlite`
//! parameters and rows without manual conversion.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw row identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered parking lot.
    LotId
);

define_id!(
    /// Identifier of a floor within a lot.
    FloorId
);

define_id!(
    /// Identifier of a parking spot.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::SpotId;
    ///
    /// let id = SpotId::new(42);
    /// assert_eq!(id.value(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    SpotId
);

define_id!(
    /// Identifier of a vehicle session record.
    VehicleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering_follows_raw_value() {
        assert!(SpotId::new(1) < SpotId::new(2));
        assert_eq!(FloorId::from(7), FloorId::new(7));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&LotId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: VehicleId = serde_json::from_str("11").unwrap();
        assert_eq!(id, VehicleId::new(11));
    }

    #[test]
    fn test_id_round_trips_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let id: SpotId = conn
            .query_row("SELECT ?1", [SpotId::new(99)], |row| row.get(0))
            .unwrap();
        assert_eq!(id, SpotId::new(99));
    }
}
