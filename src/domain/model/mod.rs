//! Entities and the relationship graph.
//!
//! The three record types keep their relationship fields private to this
//! module; [`graph::EntityGraph`] is the only writer. Everything else reads
//! links through the public accessors.

mod asset;
mod asset_history;
mod employee;
pub mod graph;
mod ids;

pub use asset::{Asset, AssetBuilder, ParseStatusError, Status};
pub use asset_history::{AssetHistory, AssetHistoryBuilder};
pub use employee::{Employee, EmployeeBuilder, Language, ParseLanguageError};
pub use graph::{EntityGraph, GraphRecords};
pub use ids::{AssetHistoryId, AssetId, EmployeeId};

use crate::domain::ports::Record;

impl Record for Employee {
    type Id = EmployeeId;

    const ENTITY_NAME: &'static str = "employee";

    fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    fn assign_id(&mut self, id: EmployeeId) {
        self.id = Some(id);
    }
}

impl Record for Asset {
    type Id = AssetId;

    const ENTITY_NAME: &'static str = "asset";

    fn id(&self) -> Option<AssetId> {
        self.id
    }

    fn assign_id(&mut self, id: AssetId) {
        self.id = Some(id);
    }
}

impl Record for AssetHistory {
    type Id = AssetHistoryId;

    const ENTITY_NAME: &'static str = "asset history";

    fn id(&self) -> Option<AssetHistoryId> {
        self.id
    }

    fn assign_id(&mut self, id: AssetHistoryId) {
        self.id = Some(id);
    }
}
