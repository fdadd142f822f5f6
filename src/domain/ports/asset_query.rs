//! Driving port for asset reads.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::model::{Asset, AssetId};

use super::list_filter::ListFilter;

/// Port for asset reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetQuery: Send + Sync {
    /// Fetch one asset by identifier.
    async fn get(&self, id: AssetId) -> Result<Asset, DomainError>;

    /// List assets, optionally restricted by a named filter.
    async fn list(&self, filter: Option<ListFilter>) -> Result<Vec<Asset>, DomainError>;
}
