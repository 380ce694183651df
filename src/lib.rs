//! HRIS engine: employees, attendance, leave, payroll and reports
//!
//! This crate provides the record stores, role-scoped access rules and
//! payroll calculations of a human-resources information system, an async
//! service layer over them, and a JSON HTTP API.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;
