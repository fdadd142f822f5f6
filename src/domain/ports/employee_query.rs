//! Driving port for employee reads.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::model::{Employee, EmployeeId};

use super::list_filter::ListFilter;

/// Port for employee reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeQuery: Send + Sync {
    /// Fetch one employee by identifier.
    async fn get(&self, id: EmployeeId) -> Result<Employee, DomainError>;

    /// List employees, optionally restricted by a named filter.
    async fn list(&self, filter: Option<ListFilter>) -> Result<Vec<Employee>, DomainError>;
}
