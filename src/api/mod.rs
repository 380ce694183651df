//! HTTP API module for the HRIS engine.
//!
//! This module exposes every [`HrService`](crate::service::HrService)
//! operation as a JSON endpoint behind bearer-token authentication.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeQuery, GenerateReportRequest, LoginRequest, ResetPasswordRequest, RunPayrollRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, MeResponse, MessageResponse, RemoveDeductionResponse,
};
pub use state::AppState;
