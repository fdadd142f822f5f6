//! Driving port for asset mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::model::{Asset, AssetId, Status};
use crate::domain::patch::PatchField;

use super::links::{AssetHistoryRef, EmployeeRef};

/// Candidate asset record for create and replace operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetPayload {
    /// Must be absent on create and match the path identifier on replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssetId>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub warranty_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    /// Employee holding this asset.
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    /// History record linked to this asset.
    #[serde(default)]
    pub asset_history: Option<AssetHistoryRef>,
}

/// Merge-patch body for assets.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetPatch {
    /// Required; must match the path identifier.
    #[serde(default)]
    pub id: Option<AssetId>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub number: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub brand: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub model: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub serial_number: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub purchase_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub warranty_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub comments: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<Status>)]
    pub status: PatchField<Status>,
    #[serde(default)]
    #[schema(value_type = Option<EmployeeRef>)]
    pub employee: PatchField<EmployeeRef>,
    #[serde(default)]
    #[schema(value_type = Option<AssetHistoryRef>)]
    pub asset_history: PatchField<AssetHistoryRef>,
}

/// Port for asset mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCommand: Send + Sync {
    /// Persist a new asset; the payload must not carry an identifier.
    async fn create(&self, payload: AssetPayload) -> Result<Asset, DomainError>;

    /// Overwrite an existing asset wholesale.
    async fn replace(&self, id: AssetId, payload: AssetPayload) -> Result<Asset, DomainError>;

    /// Apply a merge-patch to an existing asset.
    async fn partial_update(&self, id: AssetId, patch: AssetPatch) -> Result<Asset, DomainError>;

    /// Remove an asset; repeated deletes are no-ops.
    async fn delete(&self, id: AssetId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn payload_parses_status_and_references() {
        let payload: AssetPayload = serde_json::from_str(
            r#"{
                "number": "A-0001",
                "status": "IN_USE",
                "employee": {"id": 7}
            }"#,
        )
        .expect("payload");

        assert_eq!(payload.status, Some(Status::InUse));
        assert_eq!(payload.employee.expect("employee").id.get(), 7);
        assert!(payload.asset_history.is_none());
    }

    #[rstest]
    fn patch_null_reference_means_unlink() {
        let patch: AssetPatch =
            serde_json::from_str(r#"{"id": 2, "employee": null}"#).expect("patch");

        assert_eq!(patch.employee, PatchField::Clear);
        assert!(patch.asset_history.is_absent());
    }
}
