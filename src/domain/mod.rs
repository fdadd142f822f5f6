//! Domain layer: records, the relationship graph, ports, and the services
//! behind them.

pub mod error;
pub mod gate;
pub mod model;
pub mod patch;
pub mod ports;

mod asset_history_service;
mod asset_service;
mod employee_service;
mod service_support;

pub use asset_history_service::AssetHistoryService;
pub use asset_service::AssetService;
pub use employee_service::EmployeeService;
pub use error::{DomainError, ErrorCode};
pub use gate::MutationGate;
pub use model::{
    Asset, AssetHistory, AssetHistoryId, AssetId, Employee, EmployeeId, Language,
    ParseLanguageError, ParseStatusError, Status,
};
pub use patch::PatchField;
