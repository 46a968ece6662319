//! Database Layer
//!
//! Provides database connection management, models, and repositories.

mod database;
pub mod models;
pub mod repository;

pub use database::*;
pub use models::*;
pub use repository::*;
