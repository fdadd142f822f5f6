//! Builders wiring stores, services, and HTTP state together.

use std::sync::Arc;

use crate::domain::{
    Asset, AssetHistory, AssetHistoryService, AssetService, Employee, EmployeeService, MutationGate,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;

/// Build HTTP state backed by fresh in-memory stores.
///
/// All three services share the same store trio and mutation gate, so a
/// mutation through any endpoint sees and maintains the same graph.
#[must_use]
pub fn build_http_state() -> HttpState {
    let employees = Arc::new(MemoryStore::<Employee>::new());
    let assets = Arc::new(MemoryStore::<Asset>::new());
    let histories = Arc::new(MemoryStore::<AssetHistory>::new());
    let gate = MutationGate::new();

    let employee_service = Arc::new(EmployeeService::new(
        Arc::clone(&employees),
        Arc::clone(&assets),
        Arc::clone(&histories),
        gate.clone(),
    ));
    let asset_service = Arc::new(AssetService::new(
        Arc::clone(&employees),
        Arc::clone(&assets),
        Arc::clone(&histories),
        gate.clone(),
    ));
    let history_service = Arc::new(AssetHistoryService::new(
        employees,
        assets,
        histories,
        gate,
    ));

    HttpState {
        employees: Arc::clone(&employee_service) as _,
        employees_query: employee_service,
        assets: Arc::clone(&asset_service) as _,
        assets_query: asset_service,
        histories: Arc::clone(&history_service) as _,
        histories_query: history_service,
    }
}
