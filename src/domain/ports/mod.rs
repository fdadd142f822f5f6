//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_command;
mod asset_history_command;
mod asset_history_query;
mod asset_query;
mod employee_command;
mod employee_query;
mod links;
mod list_filter;
mod record_store;

#[cfg(test)]
pub use asset_command::MockAssetCommand;
pub use asset_command::{AssetCommand, AssetPatch, AssetPayload};
#[cfg(test)]
pub use asset_history_command::MockAssetHistoryCommand;
pub use asset_history_command::{AssetHistoryCommand, AssetHistoryPatch, AssetHistoryPayload};
#[cfg(test)]
pub use asset_history_query::MockAssetHistoryQuery;
pub use asset_history_query::AssetHistoryQuery;
#[cfg(test)]
pub use asset_query::MockAssetQuery;
pub use asset_query::AssetQuery;
#[cfg(test)]
pub use employee_command::MockEmployeeCommand;
pub use employee_command::{EmployeeCommand, EmployeePatch, EmployeePayload};
#[cfg(test)]
pub use employee_query::MockEmployeeQuery;
pub use employee_query::EmployeeQuery;
pub use links::{AssetHistoryRef, AssetRef, EmployeeRef};
pub use list_filter::{ListFilter, ParseListFilterError};
pub use record_store::{Record, RecordStore, RecordStoreError};
