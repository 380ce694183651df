//! Application state for the HRIS API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::HrService;

/// Shared application state.
///
/// Holds the HR service every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<HrService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: HrService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the HR service.
    pub fn service(&self) -> &HrService {
        &self.service
    }
}
