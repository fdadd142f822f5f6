//! Shared plumbing for the record services.
//!
//! The three services work the same way: validate identifiers, load the
//! records a mutation will touch into an [`EntityGraph`] working set, apply
//! graph operations, then persist everything the graph hands back. The
//! loading and persisting halves live here.

use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Asset, AssetHistory, AssetHistoryId, AssetId, Employee, EmployeeId, EntityGraph,
};
use crate::domain::ports::{AssetRef, RecordStore, RecordStoreError};

/// Map a store failure surfacing past the service's own checks.
///
/// The services validate identifiers and existence before calling into the
/// store, so anything the store still rejects is unexpected.
pub(crate) fn store_failure(err: RecordStoreError) -> DomainError {
    tracing::error!(error = %err, "record store failed");
    DomainError::internal(err.to_string())
}

/// Not-found error for a targeted record.
pub(crate) fn unknown_record(entity: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::not_found(format!("{entity} {id} does not exist"))
}

/// Enforce the update identifier rules shared by replace and merge-patch.
///
/// A missing body identifier is reported before a mismatched one, and both
/// before the existence check the caller performs next.
pub(crate) fn validate_update_ids<I>(entity: &str, path: I, body: Option<I>) -> Result<(), DomainError>
where
    I: Copy + Eq + std::fmt::Display,
{
    let Some(body) = body else {
        return Err(DomainError::missing_identifier(format!(
            "{entity} update requires an identifier in the body"
        )));
    };
    if body != path {
        return Err(DomainError::identifier_mismatch(format!(
            "path identifier {path} does not match body identifier {body}"
        )));
    }
    Ok(())
}

/// Loads mutation working sets and persists them afterwards.
///
/// `require_*` insists the referenced record exists and reports a validation
/// failure otherwise; `admit_*` silently skips records that are gone, which
/// is how dangling references left behind by deletes are tolerated.
pub(crate) struct GraphAssembler<E, A, H> {
    pub(crate) employees: Arc<E>,
    pub(crate) assets: Arc<A>,
    pub(crate) histories: Arc<H>,
}

impl<E, A, H> GraphAssembler<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    pub(crate) fn new(employees: Arc<E>, assets: Arc<A>, histories: Arc<H>) -> Self {
        Self {
            employees,
            assets,
            histories,
        }
    }

    pub(crate) async fn require_employee(
        &self,
        graph: &mut EntityGraph,
        id: EmployeeId,
    ) -> Result<(), DomainError> {
        if graph.employee(id).is_some() {
            return Ok(());
        }
        match self.employees.find_by_id(id).await.map_err(store_failure)? {
            Some(record) => {
                graph.insert_employee(record);
                Ok(())
            }
            None => Err(DomainError::validation_failure(format!(
                "referenced employee {id} does not exist"
            ))),
        }
    }

    pub(crate) async fn require_asset(
        &self,
        graph: &mut EntityGraph,
        id: AssetId,
    ) -> Result<(), DomainError> {
        if graph.asset(id).is_some() {
            return Ok(());
        }
        match self.assets.find_by_id(id).await.map_err(store_failure)? {
            Some(record) => {
                graph.insert_asset(record);
                Ok(())
            }
            None => Err(DomainError::validation_failure(format!(
                "referenced asset {id} does not exist"
            ))),
        }
    }

    pub(crate) async fn require_history(
        &self,
        graph: &mut EntityGraph,
        id: AssetHistoryId,
    ) -> Result<(), DomainError> {
        if graph.history(id).is_some() {
            return Ok(());
        }
        match self.histories.find_by_id(id).await.map_err(store_failure)? {
            Some(record) => {
                graph.insert_history(record);
                Ok(())
            }
            None => Err(DomainError::validation_failure(format!(
                "referenced asset history {id} does not exist"
            ))),
        }
    }

    pub(crate) async fn admit_employee(
        &self,
        graph: &mut EntityGraph,
        id: EmployeeId,
    ) -> Result<(), DomainError> {
        if graph.employee(id).is_none() {
            if let Some(record) = self.employees.find_by_id(id).await.map_err(store_failure)? {
                graph.insert_employee(record);
            }
        }
        Ok(())
    }

    pub(crate) async fn admit_asset(
        &self,
        graph: &mut EntityGraph,
        id: AssetId,
    ) -> Result<(), DomainError> {
        if graph.asset(id).is_none() {
            if let Some(record) = self.assets.find_by_id(id).await.map_err(store_failure)? {
                graph.insert_asset(record);
            }
        }
        Ok(())
    }

    pub(crate) async fn admit_history(
        &self,
        graph: &mut EntityGraph,
        id: AssetHistoryId,
    ) -> Result<(), DomainError> {
        if graph.history(id).is_none() {
            if let Some(record) = self.histories.find_by_id(id).await.map_err(store_failure)? {
                graph.insert_history(record);
            }
        }
        Ok(())
    }

    /// Stage the collection rewrite for an employee.
    ///
    /// Loads every incoming asset (each must exist) plus the assets currently
    /// listed, so departing ones can have their holder reference cleared.
    /// Returns the incoming identifier set for
    /// [`EntityGraph::replace_employee_assets`].
    pub(crate) async fn stage_employee_assets(
        &self,
        graph: &mut EntityGraph,
        employee: EmployeeId,
        incoming: &[AssetRef],
    ) -> Result<std::collections::BTreeSet<AssetId>, DomainError> {
        let mut new_set = std::collections::BTreeSet::new();
        for reference in incoming {
            self.require_asset(graph, reference.id).await?;
            new_set.insert(reference.id);
        }
        let current: Vec<AssetId> = graph
            .employee(employee)
            .map(|record| record.assets().iter().copied().collect())
            .unwrap_or_default();
        for asset in current {
            self.admit_asset(graph, asset).await?;
        }
        Ok(new_set)
    }

    /// Stage the records touched by binding `history` to `employee`.
    pub(crate) async fn stage_history_for_employee(
        &self,
        graph: &mut EntityGraph,
        employee: EmployeeId,
        history: AssetHistoryId,
    ) -> Result<(), DomainError> {
        self.require_history(graph, history).await?;
        let previous_holder = graph.history(history).and_then(AssetHistory::employee);
        if let Some(previous) = previous_holder {
            self.admit_employee(graph, previous).await?;
        }
        let evicted = graph.employee(employee).and_then(Employee::asset_history);
        if let Some(evicted) = evicted {
            self.admit_history(graph, evicted).await?;
        }
        Ok(())
    }

    /// Stage the records touched by unlinking `employee`'s history.
    pub(crate) async fn stage_history_release_for_employee(
        &self,
        graph: &mut EntityGraph,
        employee: EmployeeId,
    ) -> Result<(), DomainError> {
        let current = graph.employee(employee).and_then(Employee::asset_history);
        if let Some(current) = current {
            self.admit_history(graph, current).await?;
        }
        Ok(())
    }

    /// Stage the records touched by binding `history` to `asset`.
    pub(crate) async fn stage_history_for_asset(
        &self,
        graph: &mut EntityGraph,
        asset: AssetId,
        history: AssetHistoryId,
    ) -> Result<(), DomainError> {
        self.require_history(graph, history).await?;
        let previous_holder = graph.history(history).and_then(AssetHistory::asset);
        if let Some(previous) = previous_holder {
            self.admit_asset(graph, previous).await?;
        }
        let evicted = graph.asset(asset).and_then(Asset::asset_history);
        if let Some(evicted) = evicted {
            self.admit_history(graph, evicted).await?;
        }
        Ok(())
    }

    /// Stage the records touched by unlinking `asset`'s history.
    pub(crate) async fn stage_history_release_for_asset(
        &self,
        graph: &mut EntityGraph,
        asset: AssetId,
    ) -> Result<(), DomainError> {
        let current = graph.asset(asset).and_then(Asset::asset_history);
        if let Some(current) = current {
            self.admit_history(graph, current).await?;
        }
        Ok(())
    }

    /// Stage the records touched by binding `history` to `asset` from the
    /// owning side.
    pub(crate) async fn stage_asset_for_history(
        &self,
        graph: &mut EntityGraph,
        history: AssetHistoryId,
        asset: AssetId,
    ) -> Result<(), DomainError> {
        self.require_asset(graph, asset).await?;
        let evicted = graph.asset(asset).and_then(Asset::asset_history);
        if let Some(evicted) = evicted {
            self.admit_history(graph, evicted).await?;
        }
        let previous = graph.history(history).and_then(AssetHistory::asset);
        if let Some(previous) = previous {
            self.admit_asset(graph, previous).await?;
        }
        Ok(())
    }

    /// Stage the records touched by releasing `history`'s asset link.
    pub(crate) async fn stage_asset_release_for_history(
        &self,
        graph: &mut EntityGraph,
        history: AssetHistoryId,
    ) -> Result<(), DomainError> {
        let previous = graph.history(history).and_then(AssetHistory::asset);
        if let Some(previous) = previous {
            self.admit_asset(graph, previous).await?;
        }
        Ok(())
    }

    /// Stage the records touched by binding `history` to `employee` from the
    /// owning side.
    pub(crate) async fn stage_employee_for_history(
        &self,
        graph: &mut EntityGraph,
        history: AssetHistoryId,
        employee: EmployeeId,
    ) -> Result<(), DomainError> {
        self.require_employee(graph, employee).await?;
        let evicted = graph.employee(employee).and_then(Employee::asset_history);
        if let Some(evicted) = evicted {
            self.admit_history(graph, evicted).await?;
        }
        let previous = graph.history(history).and_then(AssetHistory::employee);
        if let Some(previous) = previous {
            self.admit_employee(graph, previous).await?;
        }
        Ok(())
    }

    /// Stage the records touched by releasing `history`'s employee link.
    pub(crate) async fn stage_employee_release_for_history(
        &self,
        graph: &mut EntityGraph,
        history: AssetHistoryId,
    ) -> Result<(), DomainError> {
        let previous = graph.history(history).and_then(AssetHistory::employee);
        if let Some(previous) = previous {
            self.admit_employee(graph, previous).await?;
        }
        Ok(())
    }

    /// Persist every record the graph rewrote.
    pub(crate) async fn persist(&self, graph: EntityGraph) -> Result<(), DomainError> {
        let records = graph.into_records();
        for record in records.employees {
            self.employees.save(record).await.map_err(store_failure)?;
        }
        for record in records.assets {
            self.assets.save(record).await.map_err(store_failure)?;
        }
        for record in records.histories {
            self.histories.save(record).await.map_err(store_failure)?;
        }
        Ok(())
    }
}
