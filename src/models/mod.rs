//! Request payload models for the identity endpoints.
//!
//! - `Credentials`: the email/password pair for login
//! - `AccountProfile`: registration and password-change payloads
//!
//! The session record the server answers with lives in
//! `crate::auth::UserSession`; these types only cover what travels out.

pub mod user;

pub use user::{AccountProfile, Credentials};
