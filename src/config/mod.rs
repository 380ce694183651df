//! Configuration loading and management for the HRIS engine.
//!
//! This module provides functionality to load the application settings,
//! login accounts and seed records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hris_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hris").unwrap();
//! println!("Serving {}", config.app().application.company);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Account, AccountsConfig, AppConfig, ApplicationSettings, HrisConfig, LeaveSettings, SeedData,
    ServerSettings, ServiceSettings,
};
