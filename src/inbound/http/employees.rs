//! Employee HTTP handlers.
//!
//! ```text
//! GET    /api/employees
//! POST   /api/employees
//! GET    /api/employees/{id}
//! PUT    /api/employees/{id}
//! PATCH  /api/employees/{id}
//! DELETE /api/employees/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{AssetHistoryRef, AssetRef, EmployeePatch, EmployeePayload};
use crate::domain::{DomainError, Employee, EmployeeId, Language};
use crate::inbound::http::ApiResult;
use crate::inbound::http::filters::{ListParams, parse_filter};
use crate::inbound::http::state::HttpState;

/// Response payload for an employee record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Option<EmployeeId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub employee_number: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<DateTime<Utc>>,
    pub language: Option<Language>,
    pub assets: Vec<AssetRef>,
    pub asset_history: Option<AssetHistoryRef>,
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            id: value.id(),
            assets: value.assets().iter().copied().map(AssetRef::from).collect(),
            asset_history: value.asset_history().map(AssetHistoryRef::from),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            employee_number: value.employee_number,
            phone_number: value.phone_number,
            hire_date: value.hire_date,
            language: value.language,
        }
    }
}

/// Create a new employee.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid payload", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<HttpResponse> {
    tracing::debug!("REST request to create employee");
    let created = state.employees.create(payload.into_inner()).await?;
    let id = created
        .id()
        .ok_or_else(|| DomainError::internal("created employee has no identifier"))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/employees/{id}")))
        .json(EmployeeResponse::from(created)))
}

/// List employees, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/employees",
    params(ListParams),
    responses(
        (status = 200, description = "All matching employees", body = [EmployeeResponse]),
        (status = 400, description = "Unsupported filter", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    tracing::debug!(filter = ?params.filter, "REST request to list employees");
    let filter = parse_filter(&params)?;
    let records = state.employees_query.list(filter).await?;
    Ok(web::Json(
        records.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "The employee", body = EmployeeResponse),
        (status = 404, description = "No such employee", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = EmployeeId::new(path.into_inner());
    tracing::debug!(employee = %id, "REST request to get employee");
    let record = state.employees_query.get(id).await?;
    Ok(web::Json(EmployeeResponse::from(record)))
}

/// Replace an employee wholesale.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Replaced employee", body = EmployeeResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such employee", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "replaceEmployee"
)]
#[put("/employees/{id}")]
pub async fn replace_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = EmployeeId::new(path.into_inner());
    tracing::debug!(employee = %id, "REST request to replace employee");
    let replaced = state.employees.replace(id, payload.into_inner()).await?;
    Ok(web::Json(EmployeeResponse::from(replaced)))
}

/// Merge-patch an employee.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    request_body = EmployeePatch,
    responses(
        (status = 200, description = "Patched employee", body = EmployeeResponse),
        (status = 400, description = "Identifier rules violated", body = DomainError),
        (status = 404, description = "No such employee", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "patchEmployee"
)]
#[patch("/employees/{id}")]
pub async fn patch_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<EmployeePatch>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = EmployeeId::new(path.into_inner());
    tracing::debug!(employee = %id, "REST request to patch employee");
    let patched = state
        .employees
        .partial_update(id, payload.into_inner())
        .await?;
    Ok(web::Json(EmployeeResponse::from(patched)))
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = EmployeeId::new(path.into_inner());
    tracing::debug!(employee = %id, "REST request to delete employee");
    state.employees.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
