//! Driving port for employee mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::model::{Employee, EmployeeId, Language};
use crate::domain::patch::PatchField;

use super::links::{AssetHistoryRef, AssetRef};

/// Candidate employee record for create and replace operations.
///
/// Every field is optional; replace semantics treat an absent field as an
/// instruction to clear the stored value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeePayload {
    /// Must be absent on create and match the path identifier on replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub employee_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language: Option<Language>,
    /// Assets this employee should hold; replaces the collection wholesale.
    #[serde(default)]
    pub assets: Option<Vec<AssetRef>>,
    /// History record linked to this employee.
    #[serde(default)]
    pub asset_history: Option<AssetHistoryRef>,
}

/// Merge-patch body for employees.
///
/// Absent fields keep the stored value, explicit `null` clears it, and a
/// value overwrites it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeePatch {
    /// Required; must match the path identifier.
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub employee_number: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone_number: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub hire_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<Language>)]
    pub language: PatchField<Language>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<AssetRef>>)]
    pub assets: PatchField<Vec<AssetRef>>,
    #[serde(default)]
    #[schema(value_type = Option<AssetHistoryRef>)]
    pub asset_history: PatchField<AssetHistoryRef>,
}

/// Port for employee mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Persist a new employee; the payload must not carry an identifier.
    async fn create(&self, payload: EmployeePayload) -> Result<Employee, DomainError>;

    /// Overwrite an existing employee wholesale.
    async fn replace(
        &self,
        id: EmployeeId,
        payload: EmployeePayload,
    ) -> Result<Employee, DomainError>;

    /// Apply a merge-patch to an existing employee.
    async fn partial_update(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Employee, DomainError>;

    /// Remove an employee; repeated deletes are no-ops.
    async fn delete(&self, id: EmployeeId) -> Result<(), DomainError>;
}
