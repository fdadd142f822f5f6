//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every employee, asset, and asset-history endpoint plus the
//! payload and error schemas they exchange.

use utoipa::OpenApi;

use crate::domain::ports::{
    AssetHistoryPatch, AssetHistoryPayload, AssetHistoryRef, AssetPatch, AssetPayload, AssetRef,
    EmployeePatch, EmployeePayload, EmployeeRef,
};
use crate::domain::{DomainError, ErrorCode, Language, Status};
use crate::inbound::http::asset_histories::AssetHistoryResponse;
use crate::inbound::http::assets::AssetResponse;
use crate::inbound::http::employees::EmployeeResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset registry API",
        description = "CRUD interface for employees, assets, and assignment history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::replace_employee,
        crate::inbound::http::employees::patch_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::assets::create_asset,
        crate::inbound::http::assets::list_assets,
        crate::inbound::http::assets::get_asset,
        crate::inbound::http::assets::replace_asset,
        crate::inbound::http::assets::patch_asset,
        crate::inbound::http::assets::delete_asset,
        crate::inbound::http::asset_histories::create_asset_history,
        crate::inbound::http::asset_histories::list_asset_histories,
        crate::inbound::http::asset_histories::get_asset_history,
        crate::inbound::http::asset_histories::replace_asset_history,
        crate::inbound::http::asset_histories::patch_asset_history,
        crate::inbound::http::asset_histories::delete_asset_history,
    ),
    components(schemas(
        EmployeePayload,
        EmployeePatch,
        EmployeeResponse,
        AssetPayload,
        AssetPatch,
        AssetResponse,
        AssetHistoryPayload,
        AssetHistoryPatch,
        AssetHistoryResponse,
        EmployeeRef,
        AssetRef,
        AssetHistoryRef,
        DomainError,
        ErrorCode,
        Language,
        Status,
    )),
    tags(
        (name = "employees", description = "Employee records and their asset links"),
        (name = "assets", description = "Asset records and their holder links"),
        (name = "asset-histories", description = "Assignment history records")
    )
)]
pub struct ApiDoc;
