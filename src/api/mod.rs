//! HTTP client module for the Spree identity endpoints.
//!
//! This module provides the `SessionClient` for logging in and out of a
//! storefront, plus the `OauthProvider` seam hosts implement to wire in
//! social login flows.
//!
//! The storefront authenticates calls through a set of token headers
//! (`access_token`, `client`, `uid`, `X-Spree-Token`) derived from the
//! session record the login endpoints issue.

pub mod client;
pub mod error;
pub mod oauth;

pub use client::{SessionClient, SessionClientBuilder};
pub use error::AuthError;
pub use oauth::OauthProvider;
