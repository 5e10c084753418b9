//! # Veiculos API
//!
//! A CRUD API for vehicle records and administrator accounts, with JWT
//! bearer authentication and role-based access.
//!
//! ## Core Components
//!
//! - **Store**: SQLite persistence context (WAL mode) over `tokio-rusqlite`
//! - **Vehicles**: listing with pagination and filters, create/update/delete
//! - **Auth**: administrator accounts, Argon2 password hashing, HS256 tokens, role gates
//! - **API**: Axum router, Swagger UI and OpenAPI document

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod vehicles;

pub use error::{ApiError, ApiResult};
