//! Shared types, errors, and configuration for Bolso.
//!
//! This crate provides common types used across all other crates:
//! - Money as integer minor units (centavos) with pt-BR formatting
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT auth types and the transactional email service

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::EmailService;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtService};
