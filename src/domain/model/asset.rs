//! Asset record and its status enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AssetHistoryId, AssetId, EmployeeId};

/// Lifecycle status of an asset.
///
/// # Examples
///
/// ```
/// # use asset_registry::domain::Status;
/// let parsed: Status = "NOT_WORKING".parse().unwrap();
/// assert_eq!(parsed, Status::NotWorking);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    InUse,
    Sold,
    NotWorking,
    New,
}

impl Status {
    /// Returns the stored string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InUse => "IN_USE",
            Self::Sold => "SOLD",
            Self::NotWorking => "NOT_WORKING",
            Self::New => "NEW",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {input}")]
pub struct ParseStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_USE" => Ok(Self::InUse),
            "SOLD" => Ok(Self::Sold),
            "NOT_WORKING" => Ok(Self::NotWorking),
            "NEW" => Ok(Self::New),
            _ => Err(ParseStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// A physical asset such as a laptop or phone.
///
/// The relationship fields are private; they are written only by the graph
/// operations in [`super::graph`] so the mirrored references on the linked
/// employee and asset-history records can never go stale through a direct
/// field assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub(super) id: Option<AssetId>,
    pub number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub warranty_date: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub status: Option<Status>,
    pub(super) employee: Option<EmployeeId>,
    pub(super) asset_history: Option<AssetHistoryId>,
}

impl Asset {
    /// Create a builder for a transient (not yet persisted) asset.
    pub fn builder() -> AssetBuilder {
        AssetBuilder::default()
    }

    /// Store-assigned identifier; `None` until first persisted.
    pub const fn id(&self) -> Option<AssetId> {
        self.id
    }

    /// The employee currently holding this asset, if any.
    pub const fn employee(&self) -> Option<EmployeeId> {
        self.employee
    }

    /// The linked asset-history record, if any.
    pub const fn asset_history(&self) -> Option<AssetHistoryId> {
        self.asset_history
    }
}

/// Builder for constructing [`Asset`] records incrementally.
#[derive(Debug, Clone, Default)]
pub struct AssetBuilder {
    number: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    serial_number: Option<String>,
    purchase_date: Option<DateTime<Utc>>,
    warranty_date: Option<DateTime<Utc>>,
    comments: Option<String>,
    status: Option<Status>,
}

impl AssetBuilder {
    /// Set the inventory number.
    pub fn number(mut self, value: impl Into<String>) -> Self {
        self.number = Some(value.into());
        self
    }

    /// Set the brand.
    pub fn brand(mut self, value: impl Into<String>) -> Self {
        self.brand = Some(value.into());
        self
    }

    /// Set the model.
    pub fn model(mut self, value: impl Into<String>) -> Self {
        self.model = Some(value.into());
        self
    }

    /// Set the serial number.
    pub fn serial_number(mut self, value: impl Into<String>) -> Self {
        self.serial_number = Some(value.into());
        self
    }

    /// Set the purchase date.
    pub fn purchase_date(mut self, value: DateTime<Utc>) -> Self {
        self.purchase_date = Some(value);
        self
    }

    /// Set the warranty expiry date.
    pub fn warranty_date(mut self, value: DateTime<Utc>) -> Self {
        self.warranty_date = Some(value);
        self
    }

    /// Set the free-text comments.
    pub fn comments(mut self, value: impl Into<String>) -> Self {
        self.comments = Some(value.into());
        self
    }

    /// Set the lifecycle status.
    pub fn status(mut self, value: Status) -> Self {
        self.status = Some(value);
        self
    }

    /// Build the transient asset record.
    pub fn build(self) -> Asset {
        Asset {
            id: None,
            number: self.number,
            brand: self.brand,
            model: self.model,
            serial_number: self.serial_number,
            purchase_date: self.purchase_date,
            warranty_date: self.warranty_date,
            comments: self.comments,
            status: self.status,
            employee: None,
            asset_history: None,
        }
    }
}
