//! Relationship maintenance for the entity graph.
//!
//! [`EntityGraph`] is the only code path that writes relationship fields.
//! A mutation loads every record reachable from the links it is about to
//! rewrite into the graph, applies the operations below, and persists the
//! records the graph hands back. Keeping the writes in one place guarantees
//! the mirrored references stay consistent no matter which entry point a
//! mutation came through.
//!
//! Records without an identifier are ignored on insertion: links are only
//! ever established between persisted records. Operations that name a record
//! absent from the working set fall back to a no-op on that record, which is
//! how dangling references left behind by deletes are tolerated.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::{Asset, AssetHistory, AssetHistoryId, AssetId, Employee, EmployeeId};

/// Working set of records touched by a single mutation.
#[derive(Debug, Default)]
pub struct EntityGraph {
    employees: BTreeMap<EmployeeId, Employee>,
    assets: BTreeMap<AssetId, Asset>,
    histories: BTreeMap<AssetHistoryId, AssetHistory>,
}

/// Records drained from a graph, ready to be persisted.
#[derive(Debug, Default)]
pub struct GraphRecords {
    pub employees: Vec<Employee>,
    pub assets: Vec<Asset>,
    pub histories: Vec<AssetHistory>,
}

impl EntityGraph {
    /// Create an empty working set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a persisted employee to the working set.
    pub fn insert_employee(&mut self, record: Employee) {
        if let Some(id) = record.id {
            self.employees.insert(id, record);
        }
    }

    /// Add a persisted asset to the working set.
    pub fn insert_asset(&mut self, record: Asset) {
        if let Some(id) = record.id {
            self.assets.insert(id, record);
        }
    }

    /// Add a persisted history record to the working set.
    pub fn insert_history(&mut self, record: AssetHistory) {
        if let Some(id) = record.id {
            self.histories.insert(id, record);
        }
    }

    /// Look up an employee in the working set.
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// Look up an asset in the working set.
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Look up a history record in the working set.
    pub fn history(&self, id: AssetHistoryId) -> Option<&AssetHistory> {
        self.histories.get(&id)
    }

    /// Point an asset at an employee (or at nothing).
    ///
    /// The many-to-one side only: the employee's asset collection is a
    /// derived view and is deliberately left alone here. Use
    /// [`Self::add_asset_to_employee`] or [`Self::replace_employee_assets`]
    /// to repair the collection.
    pub fn set_employee_on_asset(&mut self, asset: AssetId, employee: Option<EmployeeId>) {
        if let Some(record) = self.assets.get_mut(&asset) {
            record.employee = employee;
        }
    }

    /// Insert an asset into an employee's collection and claim it.
    ///
    /// Idempotent: re-adding an already-present asset changes nothing.
    pub fn add_asset_to_employee(&mut self, employee: EmployeeId, asset: AssetId) {
        if let Some(record) = self.employees.get_mut(&employee) {
            record.assets.insert(asset);
        }
        if let Some(record) = self.assets.get_mut(&asset) {
            record.employee = Some(employee);
        }
    }

    /// Remove an asset from an employee's collection.
    ///
    /// The asset's employee reference is cleared only when it actually points
    /// at this employee.
    pub fn remove_asset_from_employee(&mut self, employee: EmployeeId, asset: AssetId) {
        if let Some(record) = self.employees.get_mut(&employee) {
            record.assets.remove(&asset);
        }
        if let Some(record) = self.assets.get_mut(&asset) {
            if record.employee == Some(employee) {
                record.employee = None;
            }
        }
    }

    /// Replace an employee's asset collection wholesale.
    ///
    /// Departing assets have their employee reference cleared; incoming
    /// assets are claimed; the stored set becomes `new_set`.
    pub fn replace_employee_assets(&mut self, employee: EmployeeId, new_set: BTreeSet<AssetId>) {
        let current = self
            .employees
            .get(&employee)
            .map(|record| record.assets.clone())
            .unwrap_or_default();

        for departing in current.difference(&new_set) {
            if let Some(record) = self.assets.get_mut(departing) {
                record.employee = None;
            }
        }
        for incoming in &new_set {
            if let Some(record) = self.assets.get_mut(incoming) {
                record.employee = Some(employee);
            }
        }
        if let Some(record) = self.employees.get_mut(&employee) {
            record.assets = new_set;
        }
    }

    /// Link or unlink a history record from the asset side.
    pub fn set_history_on_asset(&mut self, asset: AssetId, history: Option<AssetHistoryId>) {
        match history {
            Some(history) => self.bind_history_to_asset(history, Some(asset)),
            None => {
                let current = self.assets.get(&asset).and_then(|record| record.asset_history);
                if let Some(current) = current {
                    self.bind_history_to_asset(current, None);
                }
                if let Some(record) = self.assets.get_mut(&asset) {
                    record.asset_history = None;
                }
            }
        }
    }

    /// Link or unlink a history record from the employee side.
    pub fn set_history_on_employee(&mut self, employee: EmployeeId, history: Option<AssetHistoryId>) {
        match history {
            Some(history) => self.bind_history_to_employee(history, Some(employee)),
            None => {
                let current = self
                    .employees
                    .get(&employee)
                    .and_then(|record| record.asset_history);
                if let Some(current) = current {
                    self.bind_history_to_employee(current, None);
                }
                if let Some(record) = self.employees.get_mut(&employee) {
                    record.asset_history = None;
                }
            }
        }
    }

    /// Link or unlink an asset from the history (owning) side.
    pub fn set_asset_on_history(&mut self, history: AssetHistoryId, asset: Option<AssetId>) {
        self.bind_history_to_asset(history, asset);
    }

    /// Link or unlink an employee from the history (owning) side.
    pub fn set_employee_on_history(&mut self, history: AssetHistoryId, employee: Option<EmployeeId>) {
        self.bind_history_to_employee(history, employee);
    }

    /// Drain the working set for persistence.
    pub fn into_records(self) -> GraphRecords {
        GraphRecords {
            employees: self.employees.into_values().collect(),
            assets: self.assets.into_values().collect(),
            histories: self.histories.into_values().collect(),
        }
    }

    // Canonical primitive for the Asset <-> AssetHistory pair. Releases the
    // asset the history currently claims, evicts whichever history already
    // claims the target, then installs both sides of the new link.
    fn bind_history_to_asset(&mut self, history: AssetHistoryId, target: Option<AssetId>) {
        let previous = self.histories.get(&history).and_then(|record| record.asset);
        if let Some(previous) = previous {
            if let Some(record) = self.assets.get_mut(&previous) {
                if record.asset_history == Some(history) {
                    record.asset_history = None;
                }
            }
        }

        if let Some(target) = target {
            let evicted = self
                .assets
                .get(&target)
                .and_then(|record| record.asset_history)
                .filter(|&other| other != history);
            if let Some(evicted) = evicted {
                if let Some(record) = self.histories.get_mut(&evicted) {
                    if record.asset == Some(target) {
                        record.asset = None;
                    }
                }
            }
            if let Some(record) = self.assets.get_mut(&target) {
                record.asset_history = Some(history);
            }
        }

        if let Some(record) = self.histories.get_mut(&history) {
            record.asset = target;
        }
    }

    // Identical primitive for the Employee <-> AssetHistory pair.
    fn bind_history_to_employee(&mut self, history: AssetHistoryId, target: Option<EmployeeId>) {
        let previous = self
            .histories
            .get(&history)
            .and_then(|record| record.employee);
        if let Some(previous) = previous {
            if let Some(record) = self.employees.get_mut(&previous) {
                if record.asset_history == Some(history) {
                    record.asset_history = None;
                }
            }
        }

        if let Some(target) = target {
            let evicted = self
                .employees
                .get(&target)
                .and_then(|record| record.asset_history)
                .filter(|&other| other != history);
            if let Some(evicted) = evicted {
                if let Some(record) = self.histories.get_mut(&evicted) {
                    if record.employee == Some(target) {
                        record.employee = None;
                    }
                }
            }
            if let Some(record) = self.employees.get_mut(&target) {
                record.asset_history = Some(history);
            }
        }

        if let Some(record) = self.histories.get_mut(&history) {
            record.employee = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Asset, AssetHistory, Employee};

    fn persisted_employee(id: i64) -> Employee {
        let mut record = Employee::builder().build();
        record.id = Some(EmployeeId::new(id));
        record
    }

    fn persisted_asset(id: i64) -> Asset {
        let mut record = Asset::builder().build();
        record.id = Some(AssetId::new(id));
        record
    }

    fn persisted_history(id: i64) -> AssetHistory {
        let mut record = AssetHistory::builder().build();
        record.id = Some(AssetHistoryId::new(id));
        record
    }

    fn graph_with(employees: &[i64], assets: &[i64], histories: &[i64]) -> EntityGraph {
        let mut graph = EntityGraph::new();
        for &id in employees {
            graph.insert_employee(persisted_employee(id));
        }
        for &id in assets {
            graph.insert_asset(persisted_asset(id));
        }
        for &id in histories {
            graph.insert_history(persisted_history(id));
        }
        graph
    }

    #[test]
    fn add_asset_sets_both_sides() {
        let mut graph = graph_with(&[1], &[10], &[]);
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));

        let employee = graph.employee(EmployeeId::new(1)).expect("employee");
        assert!(employee.assets().contains(&AssetId::new(10)));
        let asset = graph.asset(AssetId::new(10)).expect("asset");
        assert_eq!(asset.employee(), Some(EmployeeId::new(1)));
    }

    #[test]
    fn add_asset_is_idempotent() {
        let mut graph = graph_with(&[1], &[10], &[]);
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));

        let employee = graph.employee(EmployeeId::new(1)).expect("employee");
        assert_eq!(employee.assets().len(), 1);
    }

    #[test]
    fn remove_asset_clears_the_reference_it_owns() {
        let mut graph = graph_with(&[1], &[10], &[]);
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));
        graph.remove_asset_from_employee(EmployeeId::new(1), AssetId::new(10));

        let employee = graph.employee(EmployeeId::new(1)).expect("employee");
        assert!(employee.assets().is_empty());
        let asset = graph.asset(AssetId::new(10)).expect("asset");
        assert_eq!(asset.employee(), None);
    }

    #[test]
    fn remove_asset_leaves_a_foreign_reference_alone() {
        let mut graph = graph_with(&[1, 2], &[10], &[]);
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));
        // The asset moved on; employee 1 still lists it.
        graph.set_employee_on_asset(AssetId::new(10), Some(EmployeeId::new(2)));
        graph.remove_asset_from_employee(EmployeeId::new(1), AssetId::new(10));

        let asset = graph.asset(AssetId::new(10)).expect("asset");
        assert_eq!(asset.employee(), Some(EmployeeId::new(2)));
    }

    #[test]
    fn set_employee_on_asset_does_not_touch_the_collection() {
        let mut graph = graph_with(&[1], &[10], &[]);
        graph.set_employee_on_asset(AssetId::new(10), Some(EmployeeId::new(1)));

        let asset = graph.asset(AssetId::new(10)).expect("asset");
        assert_eq!(asset.employee(), Some(EmployeeId::new(1)));
        let employee = graph.employee(EmployeeId::new(1)).expect("employee");
        assert!(employee.assets().is_empty());
    }

    #[test]
    fn replace_assets_clears_departing_and_claims_incoming() {
        let mut graph = graph_with(&[1], &[10, 11, 12], &[]);
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(10));
        graph.add_asset_to_employee(EmployeeId::new(1), AssetId::new(11));

        let new_set: BTreeSet<_> = [AssetId::new(11), AssetId::new(12)].into();
        graph.replace_employee_assets(EmployeeId::new(1), new_set.clone());

        let employee = graph.employee(EmployeeId::new(1)).expect("employee");
        assert_eq!(employee.assets(), &new_set);
        assert_eq!(graph.asset(AssetId::new(10)).expect("asset").employee(), None);
        assert_eq!(
            graph.asset(AssetId::new(11)).expect("asset").employee(),
            Some(EmployeeId::new(1))
        );
        assert_eq!(
            graph.asset(AssetId::new(12)).expect("asset").employee(),
            Some(EmployeeId::new(1))
        );
    }

    #[test]
    fn history_link_mirrors_both_sides() {
        let mut graph = graph_with(&[], &[10], &[100]);
        graph.set_history_on_asset(AssetId::new(10), Some(AssetHistoryId::new(100)));

        assert_eq!(
            graph.asset(AssetId::new(10)).expect("asset").asset_history(),
            Some(AssetHistoryId::new(100))
        );
        assert_eq!(
            graph.history(AssetHistoryId::new(100)).expect("history").asset(),
            Some(AssetId::new(10))
        );
    }

    #[test]
    fn reassigning_a_history_clears_the_old_back_reference() {
        let mut graph = graph_with(&[], &[10, 11], &[100]);
        graph.set_asset_on_history(AssetHistoryId::new(100), Some(AssetId::new(10)));
        graph.set_asset_on_history(AssetHistoryId::new(100), Some(AssetId::new(11)));

        assert_eq!(graph.asset(AssetId::new(10)).expect("asset").asset_history(), None);
        assert_eq!(
            graph.asset(AssetId::new(11)).expect("asset").asset_history(),
            Some(AssetHistoryId::new(100))
        );
        assert_eq!(
            graph.history(AssetHistoryId::new(100)).expect("history").asset(),
            Some(AssetId::new(11))
        );
    }

    #[test]
    fn linking_a_claimed_asset_evicts_the_other_history() {
        let mut graph = graph_with(&[], &[10], &[100, 101]);
        graph.set_history_on_asset(AssetId::new(10), Some(AssetHistoryId::new(100)));
        graph.set_history_on_asset(AssetId::new(10), Some(AssetHistoryId::new(101)));

        assert_eq!(
            graph.history(AssetHistoryId::new(100)).expect("history").asset(),
            None
        );
        assert_eq!(
            graph.asset(AssetId::new(10)).expect("asset").asset_history(),
            Some(AssetHistoryId::new(101))
        );
    }

    #[test]
    fn unlinking_from_the_asset_side_clears_the_owner() {
        let mut graph = graph_with(&[], &[10], &[100]);
        graph.set_history_on_asset(AssetId::new(10), Some(AssetHistoryId::new(100)));
        graph.set_history_on_asset(AssetId::new(10), None);

        assert_eq!(graph.asset(AssetId::new(10)).expect("asset").asset_history(), None);
        assert_eq!(
            graph.history(AssetHistoryId::new(100)).expect("history").asset(),
            None
        );
    }

    #[test]
    fn employee_history_link_is_independent_of_the_asset_link() {
        let mut graph = graph_with(&[1], &[10], &[100]);
        graph.set_employee_on_history(AssetHistoryId::new(100), Some(EmployeeId::new(1)));

        let history = graph.history(AssetHistoryId::new(100)).expect("history");
        assert_eq!(history.employee(), Some(EmployeeId::new(1)));
        assert_eq!(history.asset(), None);
        assert_eq!(
            graph.employee(EmployeeId::new(1)).expect("employee").asset_history(),
            Some(AssetHistoryId::new(100))
        );
        assert_eq!(graph.asset(AssetId::new(10)).expect("asset").asset_history(), None);
    }

    #[test]
    fn reassigning_an_employee_history_clears_the_old_back_reference() {
        let mut graph = graph_with(&[1, 2], &[], &[100]);
        graph.set_employee_on_history(AssetHistoryId::new(100), Some(EmployeeId::new(1)));
        graph.set_employee_on_history(AssetHistoryId::new(100), Some(EmployeeId::new(2)));

        assert_eq!(
            graph.employee(EmployeeId::new(1)).expect("employee").asset_history(),
            None
        );
        assert_eq!(
            graph.employee(EmployeeId::new(2)).expect("employee").asset_history(),
            Some(AssetHistoryId::new(100))
        );
    }

    #[test]
    fn transient_records_are_not_admitted() {
        let mut graph = EntityGraph::new();
        graph.insert_asset(Asset::builder().build());
        assert!(graph.into_records().assets.is_empty());
    }

    #[test]
    fn operations_tolerate_dangling_references() {
        // History 100 points at asset 10, which has been deleted and is not
        // in the working set.
        let mut graph = graph_with(&[], &[11], &[100]);
        graph.set_asset_on_history(AssetHistoryId::new(100), Some(AssetId::new(11)));
        assert_eq!(
            graph.history(AssetHistoryId::new(100)).expect("history").asset(),
            Some(AssetId::new(11))
        );
    }
}
