//! Employee mutations and reads over the record stores.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::gate::MutationGate;
use crate::domain::model::{Asset, AssetHistory, Employee, EmployeeId, EntityGraph};
use crate::domain::patch::PatchField;
use crate::domain::ports::{
    EmployeeCommand, EmployeePatch, EmployeePayload, EmployeeQuery, ListFilter, Record,
    RecordStore,
};
use crate::domain::service_support::{
    GraphAssembler, store_failure, unknown_record, validate_update_ids,
};

/// Application service behind the employee command and query ports.
///
/// Every mutation runs under the shared [`MutationGate`]: a single employee
/// write can rewrite assets and history records too, so writes across all
/// three services are serialised.
pub struct EmployeeService<E, A, H> {
    stores: GraphAssembler<E, A, H>,
    gate: MutationGate,
}

impl<E, A, H> EmployeeService<E, A, H>
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
    /// Replace semantics: an absent collection or link clears the stored one.
    async fn apply_links(
        &self,
        graph: &mut EntityGraph,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<(), DomainError> {
        let incoming = payload.assets.as_deref().unwrap_or(&[]);
        let new_set = self.stores.stage_employee_assets(graph, id, incoming).await?;
        graph.replace_employee_assets(id, new_set);

        match payload.asset_history {
            Some(reference) => {
                self.stores
                    .stage_history_for_employee(graph, id, reference.id)
                    .await?;
                graph.set_history_on_employee(id, Some(reference.id));
            }
            None => {
                self.stores
                    .stage_history_release_for_employee(graph, id)
                    .await?;
                graph.set_history_on_employee(id, None);
            }
        }
        Ok(())
    }

    fn result_record(graph: &EntityGraph, id: EmployeeId) -> Result<Employee, DomainError> {
        graph
            .employee(id)
            .cloned()
            .ok_or_else(|| DomainError::internal(format!("employee {id} vanished mid-mutation")))
    }
}

fn apply_payload_scalars(record: &mut Employee, payload: &EmployeePayload) {
    record.first_name = payload.first_name.clone();
    record.last_name = payload.last_name.clone();
    record.email = payload.email.clone();
    record.employee_number = payload.employee_number.clone();
    record.phone_number = payload.phone_number.clone();
    record.hire_date = payload.hire_date;
    record.language = payload.language;
}

fn apply_patch_scalars(record: &mut Employee, patch: &EmployeePatch) {
    patch.first_name.clone().apply(&mut record.first_name);
    patch.last_name.clone().apply(&mut record.last_name);
    patch.email.clone().apply(&mut record.email);
    patch
        .employee_number
        .clone()
        .apply(&mut record.employee_number);
    patch.phone_number.clone().apply(&mut record.phone_number);
    patch.hire_date.clone().apply(&mut record.hire_date);
    patch.language.clone().apply(&mut record.language);
}

#[async_trait]
impl<E, A, H> EmployeeCommand for EmployeeService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn create(&self, payload: EmployeePayload) -> Result<Employee, DomainError> {
        if let Some(id) = payload.id {
            return Err(DomainError::identifier_conflict(format!(
                "a new employee cannot already have identifier {id}"
            )));
        }
        let _guard = self.gate.lock().await;

        // Validate references before touching the store.
        let mut graph = EntityGraph::new();
        if let Some(references) = &payload.assets {
            for reference in references {
                self.stores.require_asset(&mut graph, reference.id).await?;
            }
        }
        if let Some(reference) = payload.asset_history {
            self.stores.require_history(&mut graph, reference.id).await?;
        }

        let mut record = Employee::builder().build();
        apply_payload_scalars(&mut record, &payload);
        let record = self
            .stores
            .employees
            .insert(record)
            .await
            .map_err(store_failure)?;
        let id = record
            .id()
            .ok_or_else(|| DomainError::internal("store returned an employee without an identifier"))?;
        graph.insert_employee(record);

        self.apply_links(&mut graph, id, &payload).await?;
        let created = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(employee = %id, "created employee");
        Ok(created)
    }

    async fn replace(
        &self,
        id: EmployeeId,
        payload: EmployeePayload,
    ) -> Result<Employee, DomainError> {
        validate_update_ids(Employee::ENTITY_NAME, id, payload.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .employees
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Employee::ENTITY_NAME, id))?;
        apply_payload_scalars(&mut existing, &payload);

        let mut graph = EntityGraph::new();
        graph.insert_employee(existing);
        self.apply_links(&mut graph, id, &payload).await?;

        let replaced = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(employee = %id, "replaced employee");
        Ok(replaced)
    }

    async fn partial_update(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Employee, DomainError> {
        validate_update_ids(Employee::ENTITY_NAME, id, patch.id)?;
        let _guard = self.gate.lock().await;

        let mut existing = self
            .stores
            .employees
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Employee::ENTITY_NAME, id))?;
        apply_patch_scalars(&mut existing, &patch);

        let mut graph = EntityGraph::new();
        graph.insert_employee(existing);

        match &patch.assets {
            PatchField::Absent => {}
            PatchField::Clear => {
                let new_set = self.stores.stage_employee_assets(&mut graph, id, &[]).await?;
                graph.replace_employee_assets(id, new_set);
            }
            PatchField::Value(references) => {
                let new_set = self
                    .stores
                    .stage_employee_assets(&mut graph, id, references)
                    .await?;
                graph.replace_employee_assets(id, new_set);
            }
        }
        match patch.asset_history {
            PatchField::Absent => {}
            PatchField::Clear => {
                self.stores
                    .stage_history_release_for_employee(&mut graph, id)
                    .await?;
                graph.set_history_on_employee(id, None);
            }
            PatchField::Value(reference) => {
                self.stores
                    .stage_history_for_employee(&mut graph, id, reference.id)
                    .await?;
                graph.set_history_on_employee(id, Some(reference.id));
            }
        }

        let patched = Self::result_record(&graph, id)?;
        self.stores.persist(graph).await?;
        tracing::info!(employee = %id, "patched employee");
        Ok(patched)
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), DomainError> {
        let _guard = self.gate.lock().await;
        self.stores
            .employees
            .delete_by_id(id)
            .await
            .map_err(store_failure)?;
        tracing::info!(employee = %id, "deleted employee");
        Ok(())
    }
}

#[async_trait]
impl<E, A, H> EmployeeQuery for EmployeeService<E, A, H>
where
    E: RecordStore<Employee>,
    A: RecordStore<Asset>,
    H: RecordStore<AssetHistory>,
{
    async fn get(&self, id: EmployeeId) -> Result<Employee, DomainError> {
        self.stores
            .employees
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| unknown_record(Employee::ENTITY_NAME, id))
    }

    async fn list(&self, filter: Option<ListFilter>) -> Result<Vec<Employee>, DomainError> {
        let mut records = self
            .stores
            .employees
            .find_all()
            .await
            .map_err(store_failure)?;
        if let Some(ListFilter::AssetHistoryIsNull) = filter {
            records.retain(|record| record.asset_history().is_none());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AssetHistoryId, AssetId};
    use crate::domain::ports::{AssetHistoryRef, AssetRef};
    use crate::domain::{ErrorCode, PatchField};
    use crate::outbound::persistence::MemoryStore;

    struct Fixture {
        employees: Arc<MemoryStore<Employee>>,
        assets: Arc<MemoryStore<Asset>>,
        histories: Arc<MemoryStore<AssetHistory>>,
        service: EmployeeService<MemoryStore<Employee>, MemoryStore<Asset>, MemoryStore<AssetHistory>>,
    }

    fn fixture() -> Fixture {
        let employees = Arc::new(MemoryStore::new());
        let assets = Arc::new(MemoryStore::new());
        let histories = Arc::new(MemoryStore::new());
        let service = EmployeeService::new(
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

    async fn seeded_asset(fixture: &Fixture) -> AssetId {
        let stored = fixture
            .assets
            .insert(Asset::builder().number("A-0001").build())
            .await
            .expect("seed asset");
        stored.id().expect("id")
    }

    async fn seeded_history(fixture: &Fixture) -> AssetHistoryId {
        let stored = fixture
            .histories
            .insert(AssetHistory::builder().build())
            .await
            .expect("seed history");
        stored.id().expect("id")
    }

    #[tokio::test]
    async fn create_rejects_a_preassigned_identifier() {
        let fixture = fixture();
        let payload = EmployeePayload {
            id: Some(EmployeeId::new(7)),
            ..EmployeePayload::default()
        };

        let err = fixture.service.create(payload).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::IdentifierConflict);
    }

    #[tokio::test]
    async fn create_assigns_an_identifier_and_persists() {
        let fixture = fixture();
        let payload = EmployeePayload {
            first_name: Some("Ada".into()),
            ..EmployeePayload::default()
        };

        let created = fixture.service.create(payload).await.expect("create");
        let id = created.id().expect("id");
        let stored = fixture
            .employees
            .find_by_id(id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn create_links_assets_on_both_sides() {
        let fixture = fixture();
        let asset_id = seeded_asset(&fixture).await;
        let payload = EmployeePayload {
            assets: Some(vec![AssetRef::from(asset_id)]),
            ..EmployeePayload::default()
        };

        let created = fixture.service.create(payload).await.expect("create");
        assert!(created.assets().contains(&asset_id));
        let stored_asset = fixture
            .assets
            .find_by_id(asset_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored_asset.employee(), created.id());
    }

    #[tokio::test]
    async fn create_rejects_a_reference_to_a_missing_asset() {
        let fixture = fixture();
        let payload = EmployeePayload {
            assets: Some(vec![AssetRef::from(AssetId::new(99))]),
            ..EmployeePayload::default()
        };

        let err = fixture.service.create(payload).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::ValidationFailure);
        assert!(
            fixture
                .employees
                .find_all()
                .await
                .expect("find all")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn replace_reports_missing_identifier_before_mismatch() {
        let fixture = fixture();
        let err = fixture
            .service
            .replace(EmployeeId::new(1), EmployeePayload::default())
            .await
            .expect_err("missing id");
        assert_eq!(err.code(), ErrorCode::MissingIdentifier);
    }

    #[tokio::test]
    async fn replace_reports_mismatch_before_existence() {
        let fixture = fixture();
        let payload = EmployeePayload {
            id: Some(EmployeeId::new(2)),
            ..EmployeePayload::default()
        };
        // Neither record exists; the mismatch must win.
        let err = fixture
            .service
            .replace(EmployeeId::new(1), payload)
            .await
            .expect_err("mismatch");
        assert_eq!(err.code(), ErrorCode::IdentifierMismatch);
    }

    #[tokio::test]
    async fn replace_of_an_unknown_employee_is_not_found() {
        let fixture = fixture();
        let payload = EmployeePayload {
            id: Some(EmployeeId::new(1)),
            ..EmployeePayload::default()
        };
        let err = fixture
            .service
            .replace(EmployeeId::new(1), payload)
            .await
            .expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn not_found_errors_name_the_entity() {
        let fixture = fixture();
        let err = fixture
            .service
            .get(EmployeeId::new(5))
            .await
            .expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains(Employee::ENTITY_NAME));
    }

    #[tokio::test]
    async fn replace_clears_scalars_the_payload_omits() {
        let fixture = fixture();
        let created = fixture
            .service
            .create(EmployeePayload {
                first_name: Some("Ada".into()),
                email: Some("ada@example.org".into()),
                ..EmployeePayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let replaced = fixture
            .service
            .replace(
                id,
                EmployeePayload {
                    id: Some(id),
                    first_name: Some("Ada".into()),
                    ..EmployeePayload::default()
                },
            )
            .await
            .expect("replace");

        assert_eq!(replaced.first_name.as_deref(), Some("Ada"));
        assert_eq!(replaced.email, None);
    }

    #[tokio::test]
    async fn replace_rewrites_the_asset_collection() {
        let fixture = fixture();
        let first = seeded_asset(&fixture).await;
        let second = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(EmployeePayload {
                assets: Some(vec![AssetRef::from(first)]),
                ..EmployeePayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let replaced = fixture
            .service
            .replace(
                id,
                EmployeePayload {
                    id: Some(id),
                    assets: Some(vec![AssetRef::from(second)]),
                    ..EmployeePayload::default()
                },
            )
            .await
            .expect("replace");

        assert!(!replaced.assets().contains(&first));
        assert!(replaced.assets().contains(&second));
        let departed = fixture
            .assets
            .find_by_id(first)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(departed.employee(), None);
    }

    #[tokio::test]
    async fn patch_keeps_omitted_scalars_and_clears_null_ones() {
        let fixture = fixture();
        let created = fixture
            .service
            .create(EmployeePayload {
                first_name: Some("Ada".into()),
                email: Some("ada@example.org".into()),
                ..EmployeePayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let patched = fixture
            .service
            .partial_update(
                id,
                EmployeePatch {
                    id: Some(id),
                    email: PatchField::Clear,
                    last_name: PatchField::Value("Lovelace".into()),
                    ..EmployeePatch::default()
                },
            )
            .await
            .expect("patch");

        assert_eq!(patched.first_name.as_deref(), Some("Ada"));
        assert_eq!(patched.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(patched.email, None);
    }

    #[tokio::test]
    async fn patch_leaves_links_alone_when_absent() {
        let fixture = fixture();
        let asset_id = seeded_asset(&fixture).await;
        let history_id = seeded_history(&fixture).await;
        let created = fixture
            .service
            .create(EmployeePayload {
                assets: Some(vec![AssetRef::from(asset_id)]),
                asset_history: Some(AssetHistoryRef::from(history_id)),
                ..EmployeePayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        let patched = fixture
            .service
            .partial_update(
                id,
                EmployeePatch {
                    id: Some(id),
                    first_name: PatchField::Value("Ada".into()),
                    ..EmployeePatch::default()
                },
            )
            .await
            .expect("patch");

        assert!(patched.assets().contains(&asset_id));
        assert_eq!(patched.asset_history(), Some(history_id));
    }

    #[tokio::test]
    async fn linking_a_history_clears_the_previous_holder() {
        let fixture = fixture();
        let history_id = seeded_history(&fixture).await;
        let first = fixture
            .service
            .create(EmployeePayload {
                asset_history: Some(AssetHistoryRef::from(history_id)),
                ..EmployeePayload::default()
            })
            .await
            .expect("create first");
        let second = fixture
            .service
            .create(EmployeePayload {
                asset_history: Some(AssetHistoryRef::from(history_id)),
                ..EmployeePayload::default()
            })
            .await
            .expect("create second");

        let first_stored = fixture
            .employees
            .find_by_id(first.id().expect("id"))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(first_stored.asset_history(), None);
        assert_eq!(second.asset_history(), Some(history_id));
        let history = fixture
            .histories
            .find_by_id(history_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(history.employee(), second.id());
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_tolerates_links() {
        let fixture = fixture();
        let asset_id = seeded_asset(&fixture).await;
        let created = fixture
            .service
            .create(EmployeePayload {
                assets: Some(vec![AssetRef::from(asset_id)]),
                ..EmployeePayload::default()
            })
            .await
            .expect("create");
        let id = created.id().expect("id");

        fixture.service.delete(id).await.expect("first delete");
        fixture.service.delete(id).await.expect("second delete");
        let err = fixture.service.get(id).await.expect_err("gone");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_filter_keeps_only_history_less_employees() {
        let fixture = fixture();
        let history_id = seeded_history(&fixture).await;
        fixture
            .service
            .create(EmployeePayload {
                first_name: Some("linked".into()),
                asset_history: Some(AssetHistoryRef::from(history_id)),
                ..EmployeePayload::default()
            })
            .await
            .expect("create linked");
        fixture
            .service
            .create(EmployeePayload {
                first_name: Some("free".into()),
                ..EmployeePayload::default()
            })
            .await
            .expect("create free");

        let all = fixture.service.list(None).await.expect("list");
        assert_eq!(all.len(), 2);

        let filtered = fixture
            .service
            .list(Some(ListFilter::AssetHistoryIsNull))
            .await
            .expect("filtered list");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name.as_deref(), Some("free"));
    }
}
