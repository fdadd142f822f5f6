//! Relationship references carried in payloads.
//!
//! A payload names a linked record as a `{"id": n}` object, mirroring how
//! responses render stored links. Clients may echo a whole fetched record
//! back; any fields beyond `id` are ignored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{AssetHistoryId, AssetId, EmployeeId};

/// Reference to a persisted employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeRef {
    /// Identifier of the referenced employee.
    pub id: EmployeeId,
}

/// Reference to a persisted asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetRef {
    /// Identifier of the referenced asset.
    pub id: AssetId,
}

/// Reference to a persisted asset-history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetHistoryRef {
    /// Identifier of the referenced history record.
    pub id: AssetHistoryId,
}

impl From<EmployeeId> for EmployeeRef {
    fn from(id: EmployeeId) -> Self {
        Self { id }
    }
}

impl From<AssetId> for AssetRef {
    fn from(id: AssetId) -> Self {
        Self { id }
    }
}

impl From<AssetHistoryId> for AssetHistoryRef {
    fn from(id: AssetHistoryId) -> Self {
        Self { id }
    }
}
