//! HTTP request handlers for the HRIS API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Every endpoint except login and password reset requires an
//! `Authorization: Bearer <token>` header.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::access::sections_for;
use crate::calculation::PayrollInput;
use crate::models::{
    AttendanceRecord, DeductionPatch, DeductionType, Employee, EmployeePatch, LeaveBalance,
    LeaveRequest, NewDeduction, NewEmployee, NewLeaveRequest, Notification, PayrollCalculation,
    PayrollRecord, ReportConfig, Session, User,
};
use crate::service::{DashboardStats, PayrollRun};

use super::request::{
    EmployeeQuery, GenerateReportRequest, LoginRequest, ResetPasswordRequest, RunPayrollRequest,
};
use super::response::{ApiErrorResponse, MeResponse, MessageResponse, RemoveDeductionResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/reset-password", post(reset_password_handler))
        .route("/me", get(me_handler))
        .route("/employees", get(list_employees_handler).post(create_employee_handler))
        .route(
            "/employees/:id",
            get(get_employee_handler).patch(update_employee_handler),
        )
        .route("/attendance", get(attendance_handler))
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/leave", get(leave_requests_handler).post(apply_leave_handler))
        .route("/leave/balance", get(leave_balance_handler))
        .route("/leave/:id/approve", post(approve_leave_handler))
        .route("/leave/:id/reject", post(reject_leave_handler))
        .route("/payroll", get(payroll_handler))
        .route("/payroll/run", post(run_payroll_handler))
        .route("/payroll/preview", post(preview_payroll_handler))
        .route("/payroll/:id/process", post(process_payroll_handler))
        .route("/payroll/:id/paid", post(mark_paid_handler))
        .route("/deductions", get(deductions_handler).post(add_deduction_handler))
        .route(
            "/deductions/:id",
            patch(update_deduction_handler).delete(remove_deduction_handler),
        )
        .route("/reports", get(reports_handler).post(generate_report_handler))
        .route("/reports/:id/download", get(download_report_handler))
        .route("/notifications", get(notifications_handler))
        .route("/notifications/:id/read", post(mark_notification_read_handler))
        .route("/dashboard", get(dashboard_handler))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Tags each request with a correlation id and logs its outcome.
async fn log_requests(request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start_time = Instant::now();

    let span = info_span!("request", correlation_id = %correlation_id);
    let response = next.run(request).instrument(span).await;

    let status = response.status();
    if status.is_server_error() {
        warn!(correlation_id = %correlation_id, %method, %path, status = status.as_u16(), "Request failed");
    } else {
        info!(
            correlation_id = %correlation_id,
            %method,
            %path,
            status = status.as_u16(),
            duration_us = start_time.elapsed().as_micros(),
            "Request handled"
        );
    }
    response
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the acting user from the bearer token.
async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiErrorResponse> {
    let token = bearer_token(headers).ok_or_else(ApiErrorResponse::unauthenticated)?;
    Ok(state.service().authenticate(token).await?.user)
}

/// Unwraps a JSON body, turning rejections into API errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            Err(rejection.into())
        }
    }
}

async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Session> {
    let request = json_body(payload)?;
    let session = state
        .service()
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(session))
}

async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiErrorResponse> {
    let token = bearer_token(&headers).ok_or_else(ApiErrorResponse::unauthenticated)?;
    state.service().logout(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_password_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let request = json_body(payload)?;
    let message = state.service().reset_password(&request.email).await?;
    Ok(Json(MessageResponse { message }))
}

async fn me_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<MeResponse> {
    let user = current_user(&state, &headers).await?;
    let sections = sections_for(user.role);
    Ok(Json(MeResponse { user, sections }))
}

async fn list_employees_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EmployeeQuery>,
) -> ApiResult<Vec<Employee>> {
    let user = current_user(&state, &headers).await?;
    let employees = state
        .service()
        .list_employees(&user, query.search.as_deref())
        .await?;
    Ok(Json(employees))
}

async fn create_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiErrorResponse> {
    let user = current_user(&state, &headers).await?;
    let new = json_body(payload)?;
    let employee = state.service().create_employee(&user, new).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().get_employee(&user, &id).await?))
}

async fn update_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Employee> {
    let user = current_user(&state, &headers).await?;
    let patch = json_body(payload)?;
    Ok(Json(state.service().update_employee(&user, &id, patch).await?))
}

async fn attendance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<AttendanceRecord>> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().attendance_records(&user).await?))
}

async fn check_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<AttendanceRecord> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().check_in(&user).await?))
}

async fn check_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<AttendanceRecord> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().check_out(&user).await?))
}

async fn leave_requests_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<LeaveRequest>> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().leave_requests(&user).await?))
}

async fn apply_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewLeaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LeaveRequest>), ApiErrorResponse> {
    let user = current_user(&state, &headers).await?;
    let new = json_body(payload)?;
    let request = state.service().apply_leave(&user, new).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn leave_balance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<LeaveBalance> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().leave_balance(&user).await?))
}

async fn approve_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<LeaveRequest> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().approve_leave(&user, &id).await?))
}

async fn reject_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<LeaveRequest> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().reject_leave(&user, &id).await?))
}

async fn payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<PayrollRecord>> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().payroll_records(&user).await?))
}

async fn run_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RunPayrollRequest>, JsonRejection>,
) -> ApiResult<PayrollRun> {
    let user = current_user(&state, &headers).await?;
    let request = json_body(payload)?;
    let run = state
        .service()
        .run_payroll(&user, request.month, request.year)
        .await?;
    Ok(Json(run))
}

async fn preview_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PayrollInput>, JsonRejection>,
) -> ApiResult<PayrollCalculation> {
    let user = current_user(&state, &headers).await?;
    let input = json_body(payload)?;
    Ok(Json(state.service().preview_payroll(&user, input).await?))
}

async fn process_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<PayrollRecord> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().process_payroll(&user, &id).await?))
}

async fn mark_paid_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<PayrollRecord> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().mark_as_paid(&user, &id).await?))
}

async fn deductions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<DeductionType>> {
    current_user(&state, &headers).await?;
    Ok(Json(state.service().deductions().await?))
}

async fn add_deduction_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewDeduction>, JsonRejection>,
) -> Result<(StatusCode, Json<DeductionType>), ApiErrorResponse> {
    let user = current_user(&state, &headers).await?;
    let new = json_body(payload)?;
    let deduction = state.service().add_deduction(&user, new).await?;
    Ok((StatusCode::CREATED, Json(deduction)))
}

async fn update_deduction_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<DeductionPatch>, JsonRejection>,
) -> ApiResult<DeductionType> {
    let user = current_user(&state, &headers).await?;
    let patch = json_body(payload)?;
    Ok(Json(state.service().update_deduction(&user, &id, patch).await?))
}

async fn remove_deduction_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<RemoveDeductionResponse> {
    let user = current_user(&state, &headers).await?;
    let outcome = state.service().remove_deduction(&user, &id).await?;
    Ok(Json(RemoveDeductionResponse { id, outcome }))
}

async fn reports_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<ReportConfig>> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().recent_reports(&user).await?))
}

async fn generate_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportConfig>), ApiErrorResponse> {
    let user = current_user(&state, &headers).await?;
    let request = json_body(payload)?;
    let report = state
        .service()
        .generate_report(&user, request.report_type, request.format)
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn download_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let user = current_user(&state, &headers).await?;
    let download = state.service().download_report(&user, &id).await?;
    let disposition = format!("attachment; filename=\"{}\"", download.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, download.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.body,
    )
        .into_response())
}

async fn notifications_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Notification>> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().notifications(&user).await?))
}

async fn mark_notification_read_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Notification> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().mark_notification_read(&user, &id).await?))
}

async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<DashboardStats> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(state.service().dashboard(&user).await?))
}
