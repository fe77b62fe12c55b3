//! Authentication module for managing the user session.
//!
//! `Session` holds the bearer token issued at sign-in. It lives only in
//! memory: a restarted process must sign in again.

pub mod session;

pub use session::{Session, SessionData};
