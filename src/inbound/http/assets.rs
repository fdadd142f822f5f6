//! Asset HTTP handlers.
//!
//! ```text
//! GET    /api/assets
//! POST   /api/assets
//! GET    /api/assets/{id}
//! PUT    /api/assets/{id}
//! PATCH  /api/assets/{id}
//! DELETE /api/assets/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{AssetHistoryRef, AssetPatch, AssetPayload, EmployeeRef};
use crate::domain::{Asset, AssetId, DomainError, Status};
use crate::inbound::http::ApiResult;
use crate::inbound::http::filters::{ListParams, parse_filter};
use crate::inbound::http::state::HttpState;

/// Response payload for an asset record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: Option<AssetId>,
    pub number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub warranty_date: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub status: Option<Status>,
    pub employee: Option<EmployeeRef>,
    pub asset_history: Option<AssetHistoryRef>,
}

impl From<Asset> for AssetResponse {
    fn from(value: Asset) -> Self {
        Self {
            id: value.id(),
            employee: value.employee().map(EmployeeRef::from),
            asset_history: value.asset_history().map(AssetHistoryRef::from),
            number: value.number,
            brand: value.brand,
            model: value.model,
            serial_number: value.serial_number,
            purchase_date: value.purchase_date,
            warranty_date: value.warranty_date,
            comments: value.comments,
            status: value.status,
        }
    }
}

/// Create a new asset.
#[utoipa::path(
    post,
    path = "/api/assets",
    request_body = AssetPayload,
    responses(
        (status = 201, description = "Asset created", body = AssetResponse),
        (status = 400, description = "Invalid payload", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "createAsset"
)]
#[post("/assets")]
pub async fn create_asset(
    state: web::Data<HttpState>,
    payload: web::Json<AssetPayload>,
) -> ApiResult<HttpResponse> {
    tracing::debug!("REST request to create asset");
    let created = state.assets.create(payload.into_inner()).await?;
    let id = created
        .id()
        .ok_or_else(|| DomainError::internal("created asset has no identifier"))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/assets/{id}")))
        .json(AssetResponse::from(created)))
}

/// List assets, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/assets",
    params(ListParams),
    responses(
        (status = 200, description = "All matching assets", body = [AssetResponse]),
        (status = 400, description = "Unsupported filter", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "listAssets"
)]
#[get("/assets")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<Vec<AssetResponse>>> {
    tracing::debug!(filter = ?params.filter, "REST request to list assets");
    let filter = parse_filter(&params)?;
    let records = state.assets_query.list(filter).await?;
    Ok(web::Json(
        records.into_iter().map(AssetResponse::from).collect(),
    ))
}

/// Fetch one asset.
#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 200, description = "The asset", body = AssetResponse),
        (status = 404, description = "No such asset", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "getAsset"
)]
#[get("/assets/{id}")]
pub async fn get_asset(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<AssetResponse>> {
    let id = AssetId::new(path.into_inner());
    tracing::debug!(asset = %id, "REST request to get asset");
    let record = state.assets_query.get(id).await?;
    Ok(web::Json(AssetResponse::from(record)))
}

/// Replace an asset wholesale.
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    request_body = AssetPayload,
    responses(
        (status = 200, description = "Replaced asset", body = AssetResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such asset", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "replaceAsset"
)]
#[put("/assets/{id}")]
pub async fn replace_asset(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AssetPayload>,
) -> ApiResult<web::Json<AssetResponse>> {
    let id = AssetId::new(path.into_inner());
    tracing::debug!(asset = %id, "REST request to replace asset");
    let replaced = state.assets.replace(id, payload.into_inner()).await?;
    Ok(web::Json(AssetResponse::from(replaced)))
}

/// Merge-patch an asset.
#[utoipa::path(
    patch,
    path = "/api/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    request_body = AssetPatch,
    responses(
        (status = 200, description = "Patched asset", body = AssetResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such asset", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "patchAsset"
)]
#[patch("/assets/{id}")]
pub async fn patch_asset(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AssetPatch>,
) -> ApiResult<web::Json<AssetResponse>> {
    let id = AssetId::new(path.into_inner());
    tracing::debug!(asset = %id, "REST request to patch asset");
    let patched = state.assets.partial_update(id, payload.into_inner()).await?;
    Ok(web::Json(AssetResponse::from(patched)))
}

/// Delete an asset.
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["assets"],
    operation_id = "deleteAsset"
)]
#[delete("/assets/{id}")]
pub async fn delete_asset(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = AssetId::new(path.into_inner());
    tracing::debug!(asset = %id, "REST request to delete asset");
    state.assets.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
