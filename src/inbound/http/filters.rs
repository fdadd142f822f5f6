//! Query-string handling for list endpoints.

use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::DomainError;
use crate::domain::ports::ListFilter;

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListParams {
    /// Named predicate, e.g. `assethistory-is-null`.
    pub filter: Option<String>,
}

/// Parse the optional `filter` parameter, rejecting unknown spellings.
pub fn parse_filter(params: &ListParams) -> Result<Option<ListFilter>, DomainError> {
    match params.filter.as_deref() {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            DomainError::validation_failure(format!("unsupported list filter: {raw}"))
                .with_details(json!({ "filter": raw }))
        }),
    }
}
