//! Identifier newtypes for the three record types.
//!
//! Identifiers are issued by the record store as a monotonically increasing
//! sequence, are never reused, and are absent until a record has been
//! persisted for the first time.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier value.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw identifier value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_record_id! {
    /// Identifier of a persisted [`super::Employee`].
    EmployeeId
}

define_record_id! {
    /// Identifier of a persisted [`super::Asset`].
    AssetId
}

define_record_id! {
    /// Identifier of a persisted [`super::AssetHistory`].
    AssetHistoryId
}
