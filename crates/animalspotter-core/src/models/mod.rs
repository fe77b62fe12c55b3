//! Data models for AnimalSpotter entities.
//!
//! - `Credentials`: username/password body for sign-up and sign-in
//! - `Bearer`: token payload returned by sign-in
//! - `Animal`: a single sighting with location and picture URL

pub mod animal;
pub mod user;

pub use animal::Animal;
pub use user::{Bearer, Credentials};
