//! Asset-history record: the assignment link between an asset and an
//! employee.

use chrono::{DateTime, Utc};

use super::{AssetHistoryId, AssetId, EmployeeId};

/// Records who held an asset over a period of time.
///
/// The history is the owning side of both one-to-one links: it stores the
/// asset and employee references, and the linked records carry mirrored
/// back-references. Either link may be absent, independently of the other.
/// The relationship fields are written only by [`super::graph`] operations.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetHistory {
    pub(super) id: Option<AssetHistoryId>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub(super) asset: Option<AssetId>,
    pub(super) employee: Option<EmployeeId>,
}

impl AssetHistory {
    /// Create a builder for a transient (not yet persisted) history record.
    pub fn builder() -> AssetHistoryBuilder {
        AssetHistoryBuilder::default()
    }

    /// Store-assigned identifier; `None` until first persisted.
    pub const fn id(&self) -> Option<AssetHistoryId> {
        self.id
    }

    /// The linked asset, if any.
    pub const fn asset(&self) -> Option<AssetId> {
        self.asset
    }

    /// The linked employee, if any.
    pub const fn employee(&self) -> Option<EmployeeId> {
        self.employee
    }
}

/// Builder for constructing [`AssetHistory`] records incrementally.
#[derive(Debug, Clone, Default)]
pub struct AssetHistoryBuilder {
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl AssetHistoryBuilder {
    /// Set the assignment start date.
    pub fn start_date(mut self, value: DateTime<Utc>) -> Self {
        self.start_date = Some(value);
        self
    }

    /// Set the assignment end date.
    pub fn end_date(mut self, value: DateTime<Utc>) -> Self {
        self.end_date = Some(value);
        self
    }

    /// Build the transient history record.
    pub fn build(self) -> AssetHistory {
        AssetHistory {
            id: None,
            start_date: self.start_date,
            end_date: self.end_date,
            asset: None,
            employee: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builder_produces_a_transient_record() {
        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let history = AssetHistory::builder().start_date(start).build();

        assert_eq!(history.id(), None);
        assert_eq!(history.start_date, Some(start));
        assert_eq!(history.end_date, None);
        assert_eq!(history.asset(), None);
        assert_eq!(history.employee(), None);
    }
}
