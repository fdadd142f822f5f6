//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without real stores.

use std::sync::Arc;

use crate::domain::ports::{
    AssetCommand, AssetHistoryCommand, AssetHistoryQuery, AssetQuery, EmployeeCommand,
    EmployeeQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeCommand>,
    pub employees_query: Arc<dyn EmployeeQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
    pub histories: Arc<dyn AssetHistoryCommand>,
    pub histories_query: Arc<dyn AssetHistoryQuery>,
}
