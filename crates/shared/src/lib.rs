//! Shared types, errors, and configuration for Vestry.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Monetary rounding helpers with decimal precision
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
