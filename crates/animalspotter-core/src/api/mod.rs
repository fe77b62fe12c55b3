//! REST API client module for the AnimalSpotter service.
//!
//! This module provides the `ApiClient` for registering users, signing in,
//! and fetching animal sightings and their pictures.
//!
//! Animal endpoints use bearer token authentication; the token is obtained
//! from the sign-in endpoint and kept in the client's [`Session`](crate::auth::Session).

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
