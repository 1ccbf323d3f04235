// src/api/routes/employees.rs
//! Employee management API routes
//!
//! This module provides the CRUD, search and aggregate endpoints mounted under
//! `/employees`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{delete, get, put},
    Router,
};
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::api::{
    dto::{EmployeeDto, EmployeeRequest, SalaryRequest},
    error::ApiError,
    AppState, ApiResult,
};
use crate::model::Employee;
use crate::validation;

/// Create employee routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/byid/:id", get(get_employee))
        .route("/nameAndBirthDate/:name/:start/:end", get(search_employees))
        .route("/boss/:id", get(list_reports))
        .route("/countAndAverage/:role", get(count_and_average))
        .route("/update/:id", put(update_employee))
        .route("/update/salary/:id", put(update_salary))
        .route("/:id", delete(delete_employee))
}

fn parse_id(id: &str) -> ApiResult<Uuid> {
    Ok(Uuid::parse_str(id)?)
}

fn to_dtos(employees: &[Employee]) -> Vec<EmployeeDto> {
    employees.iter().map(EmployeeDto::from).collect()
}

/// List every employee
async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeDto>>> {
    let employees = state.service.list().await?;

    info!("Retrieved {} items", employees.len());
    Ok(Json(to_dtos(&employees)))
}

/// Get a single employee by ID
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeDto>> {
    let id = parse_id(&id)?;
    let employee = state
        .service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

    Ok(Json(EmployeeDto::from(&employee)))
}

/// Employees whose first name contains `name` and who were born in `[start, end]`
async fn search_employees(
    State(state): State<AppState>,
    Path((name, start, end)): Path<(String, String, String)>,
) -> ApiResult<Json<Vec<EmployeeDto>>> {
    let start = validation::parse_date(&start)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid start date: {}", start)))?;
    let end = validation::parse_date(&end)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid end date: {}", end)))?;

    let employees = state
        .service
        .search_by_name_and_birth_date(&name, start, end)
        .await?;

    info!("Retrieved {} items", employees.len());
    Ok(Json(to_dtos(&employees)))
}

/// Employees reporting directly to the given manager
async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<EmployeeDto>>> {
    let manager_id = parse_id(&id)?;
    let employees = state.service.list_by_manager(&manager_id).await?;

    info!("Retrieved {} items", employees.len());
    Ok(Json(to_dtos(&employees)))
}

/// `[count, averageSalary]` for a role
async fn count_and_average(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<(u64, f64)>> {
    let aggregate = state.service.aggregate_by_role(&role).await?;

    info!(
        "Retrieved {} items, salary : {}",
        aggregate.count, aggregate.average_salary
    );
    Ok(Json((aggregate.count, aggregate.average_salary)))
}

/// Create an employee
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let draft = request.validate(Utc::now())?;

    let employee = state.service.create(draft).await?;
    let location = format!("/employees/byid/{}", employee.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(EmployeeDto::from(&employee)),
    ))
}

/// Replace every mutable field of an employee
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let draft = request.validate(Utc::now())?;

    if state.service.update(&id, draft).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Employee {} not found", id)))
    }
}

/// Change an employee's salary
async fn update_salary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let salary = request.validate()?;

    if state.service.update_salary(&id, salary).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Employee {} not found", id)))
    }
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    if state.service.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Employee {} not found", id)))
    }
}
