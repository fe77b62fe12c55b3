//! Core library for the AnimalSpotter sighting service client.
//!
//! - `api`: HTTP client and error taxonomy
//! - `auth`: in-memory session holding the bearer token
//! - `models`: request and response types
//! - `viewmodel`: adapters delivering results to a single owner
//! - `config`: base URL and last username

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod viewmodel;

pub use api::{ApiClient, ApiError};
pub use auth::Session;
pub use config::Config;
pub use models::{Animal, Credentials};
