//! spreegate - session client for Spree storefront APIs.
//!
//! This crate handles the identity side of a storefront app: logging in and
//! out, registering accounts, password resets, and social login. The session
//! record the server issues is persisted through a pluggable [`SessionStore`],
//! auth headers for further API calls are derived from it on demand, and
//! login/logout transitions are published on a watch channel the host's state
//! container can subscribe to.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use spreegate::{Credentials, DiskStore, SessionClient};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = Arc::new(DiskStore::for_app("my-storefront")?);
//! let client = SessionClient::new("https://shop.example.com", store)?;
//!
//! let user = client.login(&Credentials::new("jo@example.com", "hunter2")).await?;
//! println!("logged in as {:?}", user.email);
//!
//! // every later storefront call carries the session's token headers
//! let headers = client.token_headers(&reqwest::header::HeaderMap::new());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod models;

pub use api::{AuthError, OauthProvider, SessionClient, SessionClientBuilder};
pub use auth::{AuthState, AuthStateReceiver, DiskStore, MemoryStore, SessionStore, UserSession};
pub use models::{AccountProfile, Credentials};
