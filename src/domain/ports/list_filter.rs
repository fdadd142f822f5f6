//! The single named list predicate.

/// Filter restricting a list operation to records lacking a history link.
///
/// # Examples
///
/// ```
/// # use asset_registry::domain::ports::ListFilter;
/// let filter: ListFilter = "assethistory-is-null".parse().unwrap();
/// assert_eq!(filter, ListFilter::AssetHistoryIsNull);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Keep only records whose asset-history link is absent.
    AssetHistoryIsNull,
}

impl ListFilter {
    /// The wire spelling of the filter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetHistoryIsNull => "assethistory-is-null",
        }
    }
}

impl std::fmt::Display for ListFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported filter string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported list filter: {input}")]
pub struct ParseListFilterError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for ListFilter {
    type Err = ParseListFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assethistory-is-null" => Ok(Self::AssetHistoryIsNull),
            _ => Err(ParseListFilterError {
                input: s.to_owned(),
            }),
        }
    }
}
