//! End-to-end tests for the HRIS API.
//!
//! This test suite drives the router the way a client would:
//! - Login, logout and password reset
//! - Role-scoped record visibility
//! - Leave application and approval against balances
//! - Payroll runs, processing and payment
//! - Deduction management and payroll preview
//! - Attendance check-in and check-out
//! - Report generation and download

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use hris_engine::api::{AppState, create_router};
use hris_engine::config::ConfigLoader;
use hris_engine::service::HrService;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/hris")
        .expect("Failed to load config")
        .into_config();
    let service = HrService::from_config(&config).expect("Failed to build service");
    create_router(AppState::new(service))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal should be a string")).unwrap()
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn login_admin(router: &Router) -> String {
    login(router, "admin@company.com", "Admin123").await
}

async fn login_employee(router: &Router) -> String {
    login(router, "employee@company.com", "Employee123").await
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_admin_login_returns_admin_session() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "admin@company.com", "password": "Admin123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["name"], "Admin User");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_matching_credentials_are_rejected() {
    let router = create_router_for_test();
    for (email, password) in [
        ("admin@company.com", "Employee123"),
        ("employee@company.com", "Admin123"),
        ("someone@company.com", "Password1"),
    ] {
        let (status, body) = send(
            &router,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let router = create_router_for_test();
    let token = login_admin(&router).await;

    let (status, _) = send(&router, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, "GET", "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_reset_password_message() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/auth/reset-password",
        None,
        Some(json!({ "email": "john.doe@company.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reset link sent to john.doe@company.com");
}

// =============================================================================
// Role-scoped visibility
// =============================================================================

#[tokio::test]
async fn test_employee_sees_only_own_records() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;
    let employee = login_employee(&router).await;

    let (_, all) = send(&router, "GET", "/attendance", Some(&admin), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, own) = send(&router, "GET", "/attendance", Some(&employee), None).await;
    let own = own.as_array().unwrap();
    assert_eq!(own.len(), 1);
    assert!(own.iter().all(|r| r["employee_id"] == "EMP001"));

    let (_, payroll) = send(&router, "GET", "/payroll", Some(&employee), None).await;
    assert!(
        payroll
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["employee_id"] == "EMP001")
    );
}

#[tokio::test]
async fn test_employee_is_denied_admin_sections() {
    let router = create_router_for_test();
    let employee = login_employee(&router).await;

    for uri in ["/employees", "/reports"] {
        let (status, body) = send(&router, "GET", uri, Some(&employee), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }

    let (status, _) = send(
        &router,
        "POST",
        "/payroll/run",
        Some(&employee),
        Some(json!({ "month": 11, "year": 2023 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_create_and_update_employee() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, created) = send(
        &router,
        "POST",
        "/employees",
        Some(&admin),
        Some(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace.hopper@company.com",
            "position": "Architect",
            "department": "Engineering",
            "join_date": "2023-10-01",
            "phone": "+1 555 010 0199",
            "compensation": { "basic_salary": "6000", "allowances": "250" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["id"], "EMP003");
    assert_eq!(created["status"], "active");

    let (status, updated) = send(
        &router,
        "PATCH",
        "/employees/EMP003",
        Some(&admin),
        Some(json!({ "department": "Platform" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["department"], "Platform");
    assert_eq!(updated["position"], "Architect");
}

#[tokio::test]
async fn test_create_employee_with_invalid_email() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(&admin),
        Some(json!({
            "first_name": "Bad",
            "last_name": "Email",
            "email": "bad-email",
            "position": "Clerk",
            "department": "Admin",
            "join_date": "2023-10-01",
            "phone": "+1234567890"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "email");
}

// =============================================================================
// Leave
// =============================================================================

#[tokio::test]
async fn test_apply_leave_is_pending_and_first() {
    let router = create_router_for_test();
    let employee = login_employee(&router).await;

    let (status, created) = send(
        &router,
        "POST",
        "/leave",
        Some(&employee),
        Some(json!({
            "type": "sick",
            "start_date": "2023-12-04",
            "end_date": "2023-12-05",
            "reason": "Flu"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["applied_on"], today());

    let (_, requests) = send(&router, "GET", "/leave", Some(&employee), None).await;
    let requests = requests.as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_approving_leave_reduces_balance() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;
    let employee = login_employee(&router).await;

    let (_, before) = send(&router, "GET", "/leave/balance", Some(&employee), None).await;
    assert_eq!(before["annual"], 14);

    let (status, approved) =
        send(&router, "POST", "/leave/LR001/approve", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    let (_, after) = send(&router, "GET", "/leave/balance", Some(&employee), None).await;
    assert_eq!(after["annual"], 9);

    let (status, body) = send(&router, "POST", "/leave/LR001/reject", Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATUS_TRANSITION");
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_run_process_and_pay() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, run) = send(
        &router,
        "POST",
        "/payroll/run",
        Some(&admin),
        Some(json!({ "month": 11, "year": 2023 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["period"], "November 2023");

    let generated = run["generated"].as_array().unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0]["status"], "draft");
    assert_eq!(decimal(&generated[0]["net_salary"]), Decimal::from(4950));
    let id = generated[0]["id"].as_str().unwrap().to_string();

    let (status, processed) = send(
        &router,
        "POST",
        &format!("/payroll/{}/process", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(processed["status"], "processed");

    let (status, paid) = send(
        &router,
        "POST",
        &format!("/payroll/{}/paid", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_date"], today());

    let (_, notifications) = send(&router, "GET", "/notifications", Some(&admin), None).await;
    assert_eq!(
        notifications[0]["message"],
        "Payroll generated for November 2023"
    );
}

#[tokio::test]
async fn test_preview_with_percentage_and_fixed_deduction() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    // Leave only EPF (8%) active and add a fixed 200.
    let (status, _) = send(
        &router,
        "PATCH",
        "/deductions/etf-default",
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        "POST",
        "/deductions",
        Some(&admin),
        Some(json!({ "name": "Staff Loan", "type": "fixed", "value": "200" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, preview) = send(
        &router,
        "POST",
        "/payroll/preview",
        Some(&admin),
        Some(json!({ "basic_salary": "5000", "allowances": "500" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", preview);
    assert_eq!(decimal(&preview["net_salary"]), Decimal::from(4900));
    assert_eq!(decimal(&preview["total_deductions"]), Decimal::from(600));
    assert!(!preview["audit_trace"]["steps"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deduction_removal_rules() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, body) = send(&router, "DELETE", "/deductions/epf-default", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "protected_default");

    let (_, added) = send(
        &router,
        "POST",
        "/deductions",
        Some(&admin),
        Some(json!({ "name": "Union Dues", "type": "fixed", "value": "15" })),
    )
    .await;
    let id = added["id"].as_str().unwrap().to_string();

    let (_, body) = send(
        &router,
        "DELETE",
        &format!("/deductions/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["outcome"], "removed");

    let (_, remaining) = send(&router, "GET", "/deductions", Some(&admin), None).await;
    let ids: Vec<&str> = remaining
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["epf-default", "etf-default"]);
}

#[tokio::test]
async fn test_default_flag_cannot_be_cleared_over_http() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, patched) = send(
        &router,
        "PATCH",
        "/deductions/epf-default",
        Some(&admin),
        Some(json!({ "is_default": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["is_default"], true);

    let (_, body) = send(&router, "DELETE", "/deductions/epf-default", Some(&admin), None).await;
    assert_eq!(body["outcome"], "protected_default");

    let (status, added) = send(
        &router,
        "POST",
        "/deductions",
        Some(&admin),
        Some(json!({ "name": "Levy", "type": "fixed", "value": "10", "is_default": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["is_default"], false);
}

#[tokio::test]
async fn test_combined_percentage_above_100_is_rejected() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/deductions",
        Some(&admin),
        Some(json!({ "name": "Levy", "type": "percentage", "value": "95" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, preview) = send(
        &router,
        "POST",
        "/payroll/preview",
        Some(&admin),
        Some(json!({ "basic_salary": "5000", "allowances": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", preview);
    assert_eq!(decimal(&preview["total_deductions"]), Decimal::from(550));
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_check_in_then_check_out() {
    let router = create_router_for_test();
    let employee = login_employee(&router).await;

    let (status, record) = send(&router, "POST", "/attendance/check-in", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK, "{}", record);
    assert_eq!(record["date"], today());
    assert!(record["check_out"].is_null());

    let (status, body) = send(&router, "POST", "/attendance/check-in", Some(&employee), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_CHECKED_IN");

    let (status, closed) = send(&router, "POST", "/attendance/check-out", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!closed["check_out"].is_null());
    assert!(decimal(&closed["total_hours"]) >= Decimal::ZERO);
}

#[tokio::test]
async fn test_admin_without_employee_record_cannot_check_in() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, body) = send(&router, "POST", "/attendance/check-in", Some(&admin), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_EMPLOYEE_RECORD");
}

// =============================================================================
// Reports and dashboard
// =============================================================================

#[tokio::test]
async fn test_generate_report_and_list() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;

    let (status, report) = send(
        &router,
        "POST",
        "/reports",
        Some(&admin),
        Some(json!({ "type": "employee", "format": "csv" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["name"], "New Employee Report");
    assert_eq!(report["generated_on"], today());

    let (_, reports) = send(&router, "GET", "/reports", Some(&admin), None).await;
    assert_eq!(reports[0]["id"], report["id"]);
}

#[tokio::test]
async fn test_dashboard_by_role() {
    let router = create_router_for_test();
    let admin = login_admin(&router).await;
    let employee = login_employee(&router).await;

    let (_, stats) = send(&router, "GET", "/dashboard", Some(&admin), None).await;
    assert_eq!(stats["role"], "admin");
    assert_eq!(stats["total_employees"], 2);

    let (_, stats) = send(&router, "GET", "/dashboard", Some(&employee), None).await;
    assert_eq!(stats["role"], "employee");
    assert_eq!(stats["pending_leave"], 1);
    assert_eq!(stats["leave_balance"], 28);
}
