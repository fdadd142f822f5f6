//! Driving port for asset-history mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::model::{AssetHistory, AssetHistoryId};
use crate::domain::patch::PatchField;

use super::links::{AssetRef, EmployeeRef};

/// Candidate history record for create and replace operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetHistoryPayload {
    /// Must be absent on create and match the path identifier on replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssetHistoryId>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Asset this history record is bound to.
    #[serde(default)]
    pub asset: Option<AssetRef>,
    /// Employee this history record is bound to.
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
}

/// Merge-patch body for history records.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetHistoryPatch {
    /// Required; must match the path identifier.
    #[serde(default)]
    pub id: Option<AssetHistoryId>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub start_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub end_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<AssetRef>)]
    pub asset: PatchField<AssetRef>,
    #[serde(default)]
    #[schema(value_type = Option<EmployeeRef>)]
    pub employee: PatchField<EmployeeRef>,
}

/// Port for asset-history mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetHistoryCommand: Send + Sync {
    /// Persist a new history record; the payload must not carry an identifier.
    async fn create(&self, payload: AssetHistoryPayload) -> Result<AssetHistory, DomainError>;

    /// Overwrite an existing history record wholesale.
    async fn replace(
        &self,
        id: AssetHistoryId,
        payload: AssetHistoryPayload,
    ) -> Result<AssetHistory, DomainError>;

    /// Apply a merge-patch to an existing history record.
    async fn partial_update(
        &self,
        id: AssetHistoryId,
        patch: AssetHistoryPatch,
    ) -> Result<AssetHistory, DomainError>;

    /// Remove a history record; repeated deletes are no-ops.
    async fn delete(&self, id: AssetHistoryId) -> Result<(), DomainError>;
}
