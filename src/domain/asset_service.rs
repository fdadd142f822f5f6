//! Asset mutations and reads over the record stores.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::gate::MutationGate;
use crate::domain::model::{Asset, AssetHistory, AssetId, Employee, EntityGraph};
use crate::domain::patch::PatchField;
use crate::domain::ports::{
    AssetCommand, AssetPatch, AssetPayload, AssetQuery, ListFilter, Record, RecordStore,
};
use crate::domain::service_support::{
    GraphAssembler, store_failure, unknown_record, validate_update_ids,
};

/// Application service behind the asset command and query ports.
pub struct AssetService<E, A, H> {
    stores: GraphAssembler<E, A, H>,
    gate: MutationGate,
}

impl<E, A, H> AssetService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    pub fn new(employees: Arc<E>, assets: Arc<A>, histories: Arc<H>, gate: MutationGate) -> Self {
        Self {
            stores: GraphAssembler::new(employees, assets, histories),
            gate,
        }
    }

    /// Apply the payload's relationship fields through the graph.
    ///
    /// The employee link writes the holder reference only; the employee's
    /// asset collection is a derived view repaired by employee-side writes.
    async fn apply_links(
        &self,
        graph: &mut EntityGraph,
        id: AssetId,
        payload: &AssetPayload,
    ) -> Result<(), DomainError> {
        match payload.employee {
            Some(reference) => {
                self.stores.require_employee(graph, reference.id).await?;
                graph.set_employee_on_asset(id, Some(reference.id));
            }
            None => graph.set_employee_on_asset(id, None),
        }

        match payload.asset_history {
            Some(reference) => {
                self.stores
                    .stage_history_for_asset(graph, id, reference.id)
                    .await?;
                graph.set_history_on_asset(id, Some(reference.id));
            }
            None => {
                self.stores.stage_history_release_for_asset(graph, id).await?;
                graph.set_history_on_asset(id, None);
            }
        }
        Ok(())
    }

    fn result_record(graph: &EntityGraph, id: AssetId) -> Result<Asset, DomainError> {
        graph
            .asset(id)
            .cloned()
            .ok_or_else(|| DomainError::internal(format!("asset {id} vanished mid-mutation")))
    }
}

fn apply_payload_scalars(record: &mut Asset, payload: &AssetPayload) {
    record.number = payload.number.clone();
    record.brand = payload.brand.clone();
    record.model = payload.model.clone();
    record.serial_number = payload.serial_number.clone();
    record.purchase_date = payload.purchase_date;
    record.warranty_date = payload.warranty_date;
    record.comments = payload.comments.clone();
    record.status = payload.status;
}

fn apply_patch_scalars(record: &mut Asset, patch: &AssetPatch) {
    patch.number.clone().apply(&mut record.number);
    patch.brand.clone().apply(&mut record.brand);
    patch.model.clone().apply(&mut record.model);
    patch.serial_number.clone().apply(&mut record.serial_number);
    patch.purchase_date.clone().apply(&mut record.purchase_date);
    patch.warranty_date.clone().apply(&mut record.warranty_date);
    patch.comments.clone().apply(&mut record.comments);
    patch.status.clone().apply(&mut record.status);
}

#[async_trait]
impl<E, A, H> AssetCommand for AssetService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn create(&self, payload: AssetPayload) -> Result<Asset, DomainError> {
        if let Some(id) = payload.id {
            return Err(DomainError::identifier_conflict(format!(
                "a new asset cannot already have identifier {id}"
            )));
        }
        let _guard = self.gate.lock().await;

        // Validate references before touching the store.
        let mut graph = EntityGraph::new();
        if let Some(reference) = payload.employee {
            self.stores.require_employee(&mut graph, reference.id).await?;
        }
        if let Some(reference) = payload.asset_history {
            self.stores.require_history(&mut graph, reference.id).await?;
        }

        let mut record = Asset::builder().build();
        apply_payload_scalars(&mut record, &payload);
        let record = self
            .stores
            .assets
            .insert(record)
            .await
            .map_err(store_failure)?;
        let id = record
            .id()
            .ok_or_else(|| DomainError::internal("store returned an asset without an identifier"))?;
        graph.insert_asset(record);

        self.apply_links(&mut graph, id, &payload).await?;
        let created = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset = %id, "created asset");
        Ok(created)
    }

    async fn replace(&self, id: AssetId, payload: AssetPayload) -> Result<Asset, DomainError> {
        validate_update_ids(Asset::ENTITY_NAME, id, payload.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .assets
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Asset::ENTITY_NAME, id))?;
        apply_payload_scalars(&mut existing, &payload);

        let mut graph = EntityGraph::new();
        graph.insert_asset(existing);
        self.apply_links(&mut graph, id, &payload).await?;

        let replaced = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset = %id, "replaced asset");
        Ok(replaced)
    }

    async fn partial_update(&self, id: AssetId, patch: AssetPatch) -> Result<Asset, DomainError> {
        validate_update_ids(Asset::ENTITY_NAME, id, patch.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .assets
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Asset::ENTITY_NAME, id))?;
        apply_patch_scalars(&mut existing, &patch);

        let mut graph = EntityGraph::new();
        graph.insert_asset(existing);

        match patch.employee {
            PatchField::Absent => {}
            PatchField::Clear => graph.set_employee_on_asset(id, None),
            PatchField::Value(reference) => {
                self.stores.require_employee(&mut graph, reference.id).await?;
                graph.set_employee_on_asset(id, Some(reference.id));
            }
        }
        match patch.asset_history {
            PatchField::Absent => {}
            PatchField::Clear => {
                self.stores
                    .stage_history_release_for_asset(&mut graph, id)
                    .await?;
                graph.set_history_on_asset(id, None);
            }
            PatchField::Value(reference) => {
                self.stores
                    .stage_history_for_asset(&mut graph, id, reference.id)
                    .await?;
                graph.set_history_on_asset(id, Some(reference.id));
            }
        }

        let patched = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset = %id, "patched asset");
        Ok(patched)
    }

    async fn delete(&self, id: AssetId) -> Result<(), DomainError> {
        let _guard = self.gate.lock().await;
        self.stores
            .assets
            .delete_by_id(id)
            .await
            .map_err(store_failure)?;
        tracing::info!(asset = %id, "deleted asset");
        Ok(())
    }
}

#[async_trait]
impl<E, A, H> AssetQuery for AssetService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn get(&self, id: AssetId) -> Result<Asset, DomainError> {
        self.stores
            .assets
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Asset::ENTITY_NAME, id))
    }

    async fn list(&self, filter: Option<ListFilter>) -> Result<Vec<Asset>, DomainError> {
        let mut records = self.stores.assets.find_all().await.map_err(store_failure)?;
        if let Some(ListFilter::AssetHistoryIsNull) = filter {
            records.retain(|record| record.asset_history().is_none());
        }
        Ok(records)
    }
}
