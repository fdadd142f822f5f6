//! Driving port for asset-history reads.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::model::{AssetHistory, AssetHistoryId};

/// Port for asset-history reads.
///
/// History listings take no filter; the `assethistory-is-null` predicate
/// only applies to record types that can link to a history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetHistoryQuery: Send + Sync {
    /// Fetch one history record by identifier.
    async fn get(&self, id: AssetHistoryId) -> Result<AssetHistory, DomainError>;

    /// List all history records.
    async fn list(&self) -> Result<Vec<AssetHistory>, DomainError>;
}
