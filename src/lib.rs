//! Library circulation server
//!
//! A REST JSON API for a lending library: the book catalog, members, and the
//! borrow/return workflow that keeps availability counts and overdue fines.

use std::sync::Arc;

pub mod api;
pub mod circulation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
