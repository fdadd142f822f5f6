//! Employee record and the preferred-language enumeration.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AssetHistoryId, AssetId, EmployeeId};

/// Preferred correspondence language of an employee.
///
/// # Examples
///
/// ```
/// # use asset_registry::domain::Language;
/// let parsed: Language = "FRENCH".parse().unwrap();
/// assert_eq!(parsed, Language::French);
/// assert_eq!(parsed.as_str(), "FRENCH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    French,
    English,
    Spanish,
}

impl Language {
    /// Returns the stored string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::French => "FRENCH",
            Self::English => "ENGLISH",
            Self::Spanish => "SPANISH",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown language string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {input}")]
pub struct ParseLanguageError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRENCH" => Ok(Self::French),
            "ENGLISH" => Ok(Self::English),
            "SPANISH" => Ok(Self::Spanish),
            _ => Err(ParseLanguageError {
                input: s.to_owned(),
            }),
        }
    }
}

/// An employee who can hold assets.
///
/// Every scalar field is optional; a record may be persisted with any subset
/// filled in. The relationship fields are private: they are written only by
/// the graph operations in [`super::graph`], which keep the mirrored
/// references on linked records consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub(super) id: Option<EmployeeId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub employee_number: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<DateTime<Utc>>,
    pub language: Option<Language>,
    pub(super) assets: BTreeSet<AssetId>,
    pub(super) asset_history: Option<AssetHistoryId>,
}

impl Employee {
    /// Create a builder for a transient (not yet persisted) employee.
    pub fn builder() -> EmployeeBuilder {
        EmployeeBuilder::default()
    }

    /// Store-assigned identifier; `None` until first persisted.
    pub const fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    /// Identifiers of the assets this employee holds.
    ///
    /// The collection is a derived view of `Asset::employee`: it is repaired
    /// by the collection-level graph operations, not by
    /// [`super::graph::set_employee_on_asset`].
    pub const fn assets(&self) -> &BTreeSet<AssetId> {
        &self.assets
    }

    /// The linked asset-history record, if any.
    pub const fn asset_history(&self) -> Option<AssetHistoryId> {
        self.asset_history
    }
}

/// Builder for constructing [`Employee`] records incrementally.
#[derive(Debug, Clone, Default)]
pub struct EmployeeBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    employee_number: Option<String>,
    phone_number: Option<String>,
    hire_date: Option<DateTime<Utc>>,
    language: Option<Language>,
}

impl EmployeeBuilder {
    /// Set the first name.
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name.
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the email address.
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the employee number.
    pub fn employee_number(mut self, value: impl Into<String>) -> Self {
        self.employee_number = Some(value.into());
        self
    }

    /// Set the phone number.
    pub fn phone_number(mut self, value: impl Into<String>) -> Self {
        self.phone_number = Some(value.into());
        self
    }

    /// Set the hire date.
    pub fn hire_date(mut self, value: DateTime<Utc>) -> Self {
        self.hire_date = Some(value);
        self
    }

    /// Set the preferred language.
    pub fn language(mut self, value: Language) -> Self {
        self.language = Some(value);
        self
    }

    /// Build the transient employee record.
    pub fn build(self) -> Employee {
        Employee {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            employee_number: self.employee_number,
            phone_number: self.phone_number,
            hire_date: self.hire_date,
            language: self.language,
            assets: BTreeSet::new(),
            asset_history: None,
        }
    }
}
