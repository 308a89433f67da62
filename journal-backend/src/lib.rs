// src/lib.rs
pub mod logging;

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod infrastructure;
pub mod middleware;
pub mod repository;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use api::{app_router, AppState, ExternalServices};
pub use error::{AppError, AppResult};
