//! Asset-history mutations and reads over the record stores.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::gate::MutationGate;
use crate::domain::model::{Asset, AssetHistory, AssetHistoryId, Employee, EntityGraph};
use crate::domain::patch::PatchField;
use crate::domain::ports::{
    AssetHistoryCommand, AssetHistoryPatch, AssetHistoryPayload, AssetHistoryQuery, Record,
    RecordStore,
};
use crate::domain::service_support::{
    GraphAssembler, store_failure, unknown_record, validate_update_ids,
};

/// Application service behind the asset-history command and query ports.
///
/// The history record owns both one-to-one links, so writes here can rewrite
/// employees and assets as well.
pub struct AssetHistoryService<E, A, H> {
    stores: GraphAssembler<E, A, H>,
    gate: MutationGate,
}

impl<E, A, H> AssetHistoryService<E, A, H>
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
    async fn apply_links(
        &self,
        graph: &mut EntityGraph,
        id: AssetHistoryId,
        payload: &AssetHistoryPayload,
    ) -> Result<(), DomainError> {
        match payload.asset {
            Some(reference) => {
                self.stores
                    .stage_asset_for_history(graph, id, reference.id)
                    .await?;
                graph.set_asset_on_history(id, Some(reference.id));
            }
            None => {
                self.stores
                    .stage_asset_release_for_history(graph, id)
                    .await?;
                graph.set_asset_on_history(id, None);
            }
        }

        match payload.employee {
            Some(reference) => {
                self.stores
                    .stage_employee_for_history(graph, id, reference.id)
                    .await?;
                graph.set_employee_on_history(id, Some(reference.id));
            }
            None => {
                self.stores
                    .stage_employee_release_for_history(graph, id)
                    .await?;
                graph.set_employee_on_history(id, None);
            }
        }
        Ok(())
    }

    fn result_record(graph: &EntityGraph, id: AssetHistoryId) -> Result<AssetHistory, DomainError> {
        graph
            .history(id)
            .cloned()
            .ok_or_else(|| DomainError::internal(format!("asset history {id} vanished mid-mutation")))
    }
}

fn apply_payload_scalars(record: &mut AssetHistory, payload: &AssetHistoryPayload) {
    record.start_date = payload.start_date;
    record.end_date = payload.end_date;
}

fn apply_patch_scalars(record: &mut AssetHistory, patch: &AssetHistoryPatch) {
    patch.start_date.clone().apply(&mut record.start_date);
    patch.end_date.clone().apply(&mut record.end_date);
}

#[async_trait]
impl<E, A, H> AssetHistoryCommand for AssetHistoryService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn create(&self, payload: AssetHistoryPayload) -> Result<AssetHistory, DomainError> {
        if let Some(id) = payload.id {
            return Err(DomainError::identifier_conflict(format!(
                "a new asset history cannot already have identifier {id}"
            )));
        }
        let _guard = self.gate.lock().await;

        // Validate references before touching the store.
        let mut graph = EntityGraph::new();
        if let Some(reference) = payload.asset {
            self.stores.require_asset(&mut graph, reference.id).await?;
        }
        if let Some(reference) = payload.employee {
            self.stores.require_employee(&mut graph, reference.id).await?;
        }

        let mut record = AssetHistory::builder().build();
        apply_payload_scalars(&mut record, &payload);
        let record = self
            .stores
            .histories
            .insert(record)
            .await
            .map_err(store_failure)?;
        let id = record.id().ok_or_else(|| {
            DomainError::internal("store returned an asset history without an identifier")
        })?;
        graph.insert_history(record);

        self.apply_links(&mut graph, id, &payload).await?;
        let created = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset_history = %id, "created asset history");
        Ok(created)
    }

    async fn replace(
        &self,
        id: AssetHistoryId,
        payload: AssetHistoryPayload,
    ) -> Result<AssetHistory, DomainError> {
        validate_update_ids(AssetHistory::ENTITY_NAME, id, payload.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .histories
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(AssetHistory::ENTITY_NAME, id))?;
        apply_payload_scalars(&mut existing, &payload);

        let mut graph = EntityGraph::new();
        graph.insert_history(existing);
        self.apply_links(&mut graph, id, &payload).await?;

        let replaced = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset_history = %id, "replaced asset history");
        Ok(replaced)
    }

    async fn partial_update(
        &self,
        id: AssetHistoryId,
        patch: AssetHistoryPatch,
    ) -> Result<AssetHistory, DomainError> {
        validate_update_ids(AssetHistory::ENTITY_NAME, id, patch.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .histories
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(AssetHistory::ENTITY_NAME, id))?;
        apply_patch_scalars(&mut existing, &patch);

        let mut graph = EntityGraph::new();
        graph.insert_history(existing);

        match patch.asset {
            PatchField::Absent => {}
            PatchField::Clear => {
                self.stores
                    .stage_asset_release_for_history(&mut graph, id)
                    .await?;
                graph.set_asset_on_history(id, None);
            }
            PatchField::Value(reference) => {
                self.stores
                    .stage_asset_for_history(&mut graph, id, reference.id)
                    .await?;
                graph.set_asset_on_history(id, Some(reference.id));
            }
        }
        match patch.employee {
            PatchField::Absent => {}
            PatchField::Clear => {
                self.stores
                    .stage_employee_release_for_history(&mut graph, id)
                    .await?;
                graph.set_employee_on_history(id, None);
            }
            PatchField::Value(reference) => {
                self.stores
                    .stage_employee_for_history(&mut graph, id, reference.id)
                    .await?;
                graph.set_employee_on_history(id, Some(reference.id));
            }
        }

        let patched = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(asset_history = %id, "patched asset history");
        Ok(patched)
    }

    async fn delete(&self, id: AssetHistoryId) -> Result<(), DomainError> {
        let _guard = self.gate.lock().await;
        self.stores
            .histories
            .delete_by_id(id)
            .await
            .map_err(store_failure)?;
        tracing::info!(asset_history = %id, "deleted asset history");
        Ok(())
    }
}

#[async_trait]
impl<E, A, H> AssetHistoryQuery for AssetHistoryService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn get(&self, id: AssetHistoryId) -> Result<AssetHistory, DomainError> {
        self.stores
            .histories
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(AssetHistory::ENTITY_NAME, id))
    }

    async fn list(&self) -> Result<Vec<AssetHistory>, DomainError> {
        self.stores
            .histories
            .find_all()
            .await
            .map_err(store_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AssetId, EmployeeId};
    use crate::domain::ports::{AssetRef, EmployeeRef};
    use crate::domain::{ErrorCode, PatchField};
    use crate::outbound::persistence::MemoryStore;
    use chrono::TimeZone;

    struct Fixture {
        employees: Arc<MemoryStore<Employee>>,
        assets: Arc<MemoryStore<Asset>>,
        histories: Arc<MemoryStore<AssetHistory>>,
        service: AssetHistoryService<
            MemoryStore<Employee>,
            MemoryStore<Asset>,
            MemoryStore<AssetHistory>,
        >,
    }

    fn fixture() -> Fixture {
        let employees = Arc::new(MemoryStore::new());
        let assets = Arc::new(MemoryStore::new());
        let histories = Arc::new(MemoryStore::new());
        let service = AssetHistoryService::new(
            Arc::clone(&employees),
            Arc::clone(&assets),
            Arc::clone(&histories),
            MutationGate::new(),
        );
        Fixture {
            employees,
            assets,
            histories,
            service,
        }
    }

    async fn seeded_employee(fixture: &Fixture) -> EmployeeId {
        let stored = fixture
            .employees
            .insert(Employee::builder().build())
            .await
            .expect("seed employee");
        stored.id().expect("id")
    }

    async fn seeded_asset(fixture: &Fixture) -> AssetId {
        let stored = fixture
            .assets
            .insert(Asset::builder().build())
            .await
            .expect("seed asset");
        stored.id().expect("id")
    }

    #[tokio::test]
    async fn create_rejects_a_preassigned_identifier() {
        let fixture = fixture();
        let payload = AssetHistoryPayload {
            id: Some(AssetHistoryId::new(3)),
            ..AssetHistoryPayload::default()
        };

        let err = fixture.service.create(payload).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::IdentifierConflict);
        assert!(
            fixture
                .histories
                .find_all()
                .await
                .expect("find all")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn create_binds_both_sides_of_both_links() {
        let fixture = fixture();
        let employee_id = seeded_employee(&fixture).await;
        let asset_id = seeded_asset(&fixture).await;
        let start = chrono::Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();

        let created = fixture
            .service
            .create(AssetHistoryPayload {
                start_date: Some(start),
                asset: Some(AssetRef::from(asset_id)),
                employee: Some(EmployeeRef::from(employee_id)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");

        assert_eq!(created.asset(), Some(asset_id));
        assert_eq!(created.employee(), Some(employee_id));
        let asset = fixture
            .assets
            .find_by_id(asset_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(asset.asset_history(), created.id());
        let employee = fixture
            .employees
            .find_by_id(employee_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(employee.asset_history(), created.id());
    }

    #[tokio::test]
    async fn create_rejects_missing_references() {
        let fixture = fixture();
        let payload = AssetHistoryPayload {
            asset: Some(AssetRef::from(AssetId::new(9))),
            ..AssetHistoryPayload::default()
        };

        let err = fixture.service.create(payload).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::ValidationFailure);
        assert!(
            fixture
                .histories
                .find_all()
                .await
                .expect("find all")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn reassigning_the_asset_link_clears_the_old_mirror() {
        let fixture = fixture();
        let first = seeded_asset(&fixture).await;
        let second = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(AssetHistoryPayload {
                asset: Some(AssetRef::from(first)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let replaced = fixture
            .service
            .replace(
                id,
                AssetHistoryPayload {
                    id: Some(id),
                    asset: Some(AssetRef::from(second)),
                    ..AssetHistoryPayload::default()
                },
            )
            .await
            .expect("replace");

        assert_eq!(replaced.asset(), Some(second));
        let old = fixture
            .assets
            .find_by_id(first)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(old.asset_history(), None);
        let new = fixture
            .assets
            .find_by_id(second)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(new.asset_history(), Some(id));
    }

    #[tokio::test]
    async fn replace_with_omitted_links_unbinds_both_sides() {
        let fixture = fixture();
        let employee_id = seeded_employee(&fixture).await;
        let asset_id = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(AssetHistoryPayload {
                asset: Some(AssetRef::from(asset_id)),
                employee: Some(EmployeeRef::from(employee_id)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let replaced = fixture
            .service
            .replace(
                id,
                AssetHistoryPayload {
                    id: Some(id),
                    ..AssetHistoryPayload::default()
                },
            )
            .await
            .expect("replace");

        assert_eq!(replaced.asset(), None);
        assert_eq!(replaced.employee(), None);
        let asset = fixture
            .assets
            .find_by_id(asset_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(asset.asset_history(), None);
        let employee = fixture
            .employees
            .find_by_id(employee_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(employee.asset_history(), None);
    }

    #[tokio::test]
    async fn patch_rewrites_one_link_and_keeps_the_other() {
        let fixture = fixture();
        let employee_id = seeded_employee(&fixture).await;
        let asset_id = seeded_asset(&fixture).await;
        let other_asset = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(AssetHistoryPayload {
                asset: Some(AssetRef::from(asset_id)),
                employee: Some(EmployeeRef::from(employee_id)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let patched = fixture
            .service
            .partial_update(
                id,
                AssetHistoryPatch {
                    id: Some(id),
                    asset: PatchField::Value(AssetRef::from(other_asset)),
                    ..AssetHistoryPatch::default()
                },
            )
            .await
            .expect("patch");

        assert_eq!(patched.asset(), Some(other_asset));
        assert_eq!(patched.employee(), Some(employee_id));
    }

    #[tokio::test]
    async fn patch_scalars_without_links_touches_no_neighbours() {
        let fixture = fixture();
        let asset_id = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(AssetHistoryPayload {
                asset: Some(AssetRef::from(asset_id)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");
        let end = chrono::Utc.with_ymd_and_hms(2026, 6, 1, 17, 0, 0).unwrap();

        let patched = fixture
            .service
            .partial_update(
                id,
                AssetHistoryPatch {
                    id: Some(id),
                    end_date: PatchField::Value(end),
                    ..AssetHistoryPatch::default()
                },
            )
            .await
            .expect("patch");

        assert_eq!(patched.end_date, Some(end));
        assert_eq!(patched.asset(), Some(asset_id));
    }

    #[tokio::test]
    async fn delete_leaves_mirrors_dangling_but_tolerated() {
        let fixture = fixture();
        let asset_id = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(AssetHistoryPayload {
                asset: Some(AssetRef::from(asset_id)),
                ..AssetHistoryPayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        fixture.service.delete(id).await.expect("delete");
        fixture.service.delete(id).await.expect("repeat delete");

        // The asset still points at the deleted history; later mutations
        // tolerate the dangling reference.
        let asset = fixture
            .assets
            .find_by_id(asset_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(asset.asset_history(), Some(id));
        let err = fixture.service.get(id).await.expect_err("gone");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn replace_reports_missing_identifier_first() {
        let fixture = fixture();
        let err = fixture
            .service
            .replace(AssetHistoryId::new(1), AssetHistoryPayload::default())
            .await
            .expect_err("missing id");
        assert_eq!(err.code(), ErrorCode::MissingIdentifier);
    }
}
