//! Employee endpoints. Every JSON handler answers with an [`Outcome`]
//! envelope; failures that abort early surface as [`ApiError`].

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Html,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use entity::department;
use platform_api::{ApiError, ApiResult, Empty, FieldErrors, Outcome};
use platform_db::{Employee, PageInfo};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    extract::FormFields,
    forms::{
        D_ID_UNKNOWN, EMP_NAME_RULE, EMP_NAME_TAKEN, EmployeeForm, EmployeePatch,
        is_valid_emp_name,
    },
    http::AppState,
    ids::{IdSet, parse_id},
    service::WriteOutcome,
    views,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/emps", get(list_emps))
        .route("/list", get(list_emps_view))
        .route("/emp", post(save_emp))
        .route(
            "/emp/{id}",
            get(get_emp).put(update_emp).delete(delete_emps),
        )
        .route("/checkuser", get(check_user).post(check_user_form))
        .route("/depts", get(list_depts))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pn: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CheckUserQuery {
    #[serde(rename = "empName")]
    emp_name: String,
}

#[derive(Debug, Serialize)]
pub struct EmpPayload {
    emp: Employee,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoPayload {
    page_info: PageInfo<Employee>,
}

#[derive(Debug, Serialize)]
pub struct DeptsPayload {
    depts: Vec<department::Model>,
}

#[instrument(name = "emp.list", skip(state))]
async fn list_emps(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, ApiError>,
) -> ApiResult<Outcome<PageInfoPayload>> {
    let request = state.config.page_request(query.pn.unwrap_or(1));
    let page_info = state.employees.get_all(request).await?;
    Ok(Outcome::Success(PageInfoPayload { page_info }))
}

#[instrument(name = "emp.list_view", skip(state))]
async fn list_emps_view(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, ApiError>,
) -> ApiResult<Html<String>> {
    let request = state.config.page_request(query.pn.unwrap_or(1));
    let page = state.employees.get_all(request).await?;
    Ok(Html(views::render_employee_page(&page)))
}

#[instrument(name = "emp.get", skip(state))]
async fn get_emp(
    State(state): State<AppState>,
    WithRejection(Path(raw_id), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<Outcome<EmpPayload>> {
    let emp_id = parse_id(&raw_id)?;
    let outcome = match state.employees.get_emp(emp_id).await? {
        Some(emp) => Outcome::Success(EmpPayload { emp }),
        None => Outcome::NotFound(format!("employee {emp_id} not found")),
    };
    Ok(outcome)
}

#[instrument(name = "emp.save", skip(state, form))]
async fn save_emp(
    State(state): State<AppState>,
    FormFields(form): FormFields<EmployeeForm>,
) -> ApiResult<Outcome<Empty>> {
    let new = match form.into_new_employee() {
        Ok(new) => new,
        Err(fields) => {
            warn!(fields = ?fields.keys().collect::<Vec<_>>(), "employee form rejected");
            return Ok(Outcome::ValidationFailed(fields));
        }
    };
    Ok(write_outcome(state.employees.save_emp(new).await?))
}

#[instrument(name = "emp.update", skip(state, patch))]
async fn update_emp(
    State(state): State<AppState>,
    WithRejection(Path(raw_id), _): WithRejection<Path<String>, ApiError>,
    FormFields(patch): FormFields<EmployeePatch>,
) -> ApiResult<Outcome<Empty>> {
    let emp_id = parse_id(&raw_id)?;
    let changes = match patch.into_changes() {
        Ok(changes) => changes,
        Err(fields) => return Ok(Outcome::ValidationFailed(fields)),
    };
    Ok(write_outcome(state.employees.update_emp(emp_id, changes).await?))
}

#[instrument(name = "emp.delete", skip(state))]
async fn delete_emps(
    State(state): State<AppState>,
    WithRejection(Path(raw_ids), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<Outcome<Empty>> {
    let removed = match raw_ids.parse::<IdSet>()? {
        IdSet::One(emp_id) => state.employees.delete_emp(emp_id).await?,
        IdSet::Many(emp_ids) => state.employees.delete_batch(&emp_ids).await?,
    };
    info!(removed, "employees deleted");
    Ok(Outcome::ok())
}

#[instrument(name = "emp.check_user", skip(state))]
async fn check_user(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CheckUserQuery>, ApiError>,
) -> ApiResult<Outcome<Empty>> {
    check_name(&state, &query.emp_name).await
}

#[instrument(name = "emp.check_user", skip(state))]
async fn check_user_form(
    State(state): State<AppState>,
    WithRejection(Form(query), _): WithRejection<Form<CheckUserQuery>, ApiError>,
) -> ApiResult<Outcome<Empty>> {
    check_name(&state, &query.emp_name).await
}

async fn check_name(state: &AppState, emp_name: &str) -> ApiResult<Outcome<Empty>> {
    if !is_valid_emp_name(emp_name) {
        return Ok(Outcome::NotAvailable(EMP_NAME_RULE.to_string()));
    }
    if state.employees.check_user(emp_name).await? {
        Ok(Outcome::ok())
    } else {
        Ok(Outcome::NotAvailable(EMP_NAME_TAKEN.to_string()))
    }
}

#[instrument(name = "dept.list", skip(state))]
async fn list_depts(State(state): State<AppState>) -> ApiResult<Outcome<DeptsPayload>> {
    let depts = state.departments.get_depts().await?;
    Ok(Outcome::Success(DeptsPayload { depts }))
}

fn write_outcome<T>(outcome: WriteOutcome<T>) -> Outcome<Empty> {
    let (field, message) = match outcome {
        WriteOutcome::Written(_) => return Outcome::ok(),
        WriteOutcome::NameTaken => ("empName", EMP_NAME_TAKEN),
        WriteOutcome::UnknownDepartment => ("dId", D_ID_UNKNOWN),
    };
    Outcome::ValidationFailed(FieldErrors::from([(
        field.to_string(),
        message.to_string(),
    )]))
}
