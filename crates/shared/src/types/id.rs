//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `JournalId` where an
//! `AccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(JournalId, "Unique identifier for a journal.");
typed_id!(JournalLineId, "Unique identifier for a journal line.");
typed_id!(FiscalPeriodId, "Unique identifier for a fiscal period.");
typed_id!(BudgetId, "Unique identifier for a budget.");
typed_id!(BudgetLineId, "Unique identifier for a budget line.");
typed_id!(FixedAssetId, "Unique identifier for a fixed asset.");
typed_id!(
    DepreciationEntryId,
    "Unique identifier for a depreciation schedule entry."
);
typed_id!(ClosingId, "Unique identifier for a year-end closing record.");
typed_id!(
    ResponsibilityCenterId,
    "Unique identifier for a responsibility center."
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        let a = JournalId::new();
        let b = JournalId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_roundtrip_via_string() {
        let id = AccountId::new();
        let parsed = AccountId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = BudgetId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }
}
