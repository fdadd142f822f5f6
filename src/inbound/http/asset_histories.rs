//! Asset-history HTTP handlers.
//!
//! ```text
//! GET    /api/asset-histories
//! POST   /api/asset-histories
//! GET    /api/asset-histories/{id}
//! PUT    /api/asset-histories/{id}
//! PATCH  /api/asset-histories/{id}
//! DELETE /api/asset-histories/{id}
//! ```
//!
//! History listings take no filter parameter; the only named filter applies
//! to record types that link to a history.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{AssetHistoryPatch, AssetHistoryPayload, AssetRef, EmployeeRef};
use crate::domain::{AssetHistory, AssetHistoryId, DomainError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response payload for an asset-history record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetHistoryResponse {
    pub id: Option<AssetHistoryId>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub asset: Option<AssetRef>,
    pub employee: Option<EmployeeRef>,
}

impl From<AssetHistory> for AssetHistoryResponse {
    fn from(value: AssetHistory) -> Self {
        Self {
            id: value.id(),
            asset: value.asset().map(AssetRef::from),
            employee: value.employee().map(EmployeeRef::from),
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

/// Create a new history record.
#[utoipa::path(
    post,
    path = "/api/asset-histories",
    request_body = AssetHistoryPayload,
    responses(
        (status = 201, description = "History record created", body = AssetHistoryResponse),
        (status = 400, description = "Invalid payload", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["asset-histories"],
    operation_id = "createAssetHistory"
)]
#[post("/asset-histories")]
pub async fn create_asset_history(
    state: web::Data<HttpState>,
    payload: web::Json<AssetHistoryPayload>,
) -> ApiResult<HttpResponse> {
    tracing::debug!("REST request to create asset history");
    let created = state.histories.create(payload.into_inner()).await?;
    let id = created
        .id()
        .ok_or_else(|| DomainError::internal("created asset history has no identifier"))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/asset-histories/{id}")))
        .json(AssetHistoryResponse::from(created)))
}

/// List all history records.
#[utoipa::path(
    get,
    path = "/api/asset-histories",
    responses(
        (status = 200, description = "All history records", body = [AssetHistoryResponse])
    ),
    tags = ["asset-histories"],
    operation_id = "listAssetHistories"
)]
#[get("/asset-histories")]
pub async fn list_asset_histories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AssetHistoryResponse>>> {
    tracing::debug!("REST request to list asset histories");
    let records = state.histories_query.list().await?;
    Ok(web::Json(
        records.into_iter().map(AssetHistoryResponse::from).collect(),
    ))
}

/// Fetch one history record.
#[utoipa::path(
    get,
    path = "/api/asset-histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    responses(
        (status = 200, description = "The history record", body = AssetHistoryResponse),
        (status = 404, description = "No such history record", body = DomainError)
    ),
    tags = ["asset-histories"],
    operation_id = "getAssetHistory"
)]
#[get("/asset-histories/{id}")]
pub async fn get_asset_history(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<AssetHistoryResponse>> {
    let id = AssetHistoryId::new(path.into_inner());
    tracing::debug!(asset_history = %id, "REST request to get asset history");
    let record = state.histories_query.get(id).await?;
    Ok(web::Json(AssetHistoryResponse::from(record)))
}

/// Replace a history record wholesale.
#[utoipa::path(
    put,
    path = "/api/asset-histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    request_body = AssetHistoryPayload,
    responses(
        (status = 200, description = "Replaced history record", body = AssetHistoryResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such history record", body = DomainError)
    ),
    tags = ["asset-histories"],
    operation_id = "replaceAssetHistory"
)]
#[put("/asset-histories/{id}")]
pub async fn replace_asset_history(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AssetHistoryPayload>,
) -> ApiResult<web::Json<AssetHistoryResponse>> {
    let id = AssetHistoryId::new(path.into_inner());
    tracing::debug!(asset_history = %id, "REST request to replace asset history");
    let replaced = state.histories.replace(id, payload.into_inner()).await?;
    Ok(web::Json(AssetHistoryResponse::from(replaced)))
}

/// Merge-patch a history record.
#[utoipa::path(
    patch,
    path = "/api/asset-histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    request_body = AssetHistoryPatch,
    responses(
        (status = 200, description = "Patched history record", body = AssetHistoryResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such history record", body = DomainError)
    ),
    tags = ["asset-histories"],
    operation_id = "patchAssetHistory"
)]
#[patch("/asset-histories/{id}")]
pub async fn patch_asset_history(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AssetHistoryPatch>,
) -> ApiResult<web::Json<AssetHistoryResponse>> {
    let id = AssetHistoryId::new(path.into_inner());
    tracing::debug!(asset_history = %id, "REST request to patch asset history");
    let patched = state
        .histories
        .partial_update(id, payload.into_inner())
        .await?;
    Ok(web::Json(AssetHistoryResponse::from(patched)))
}

/// Delete a history record.
#[utoipa::path(
    delete,
    path = "/api/asset-histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["asset-histories"],
    operation_id = "deleteAssetHistory"
)]
#[delete("/asset-histories/{id}")]
pub async fn delete_asset_history(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = AssetHistoryId::new(path.into_inner());
    tracing::debug!(asset_history = %id, "REST request to delete asset history");
    state.histories.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
