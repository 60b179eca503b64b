//! Session state module.
//!
//! This module provides:
//! - `UserSession`: the session record the identity endpoints issue
//! - `SessionStore`: the storage capability the client persists through,
//!   with `DiskStore` and `MemoryStore` implementations
//! - `AuthState`: the login/logout feed published to the host's state
//!   container
//!
//! The record lives under a single `user` key and stays valid until a
//! logout removes it; there is no client-side expiry.

pub mod session;
pub mod state;
pub mod store;

pub use session::UserSession;
pub use state::{AuthState, AuthStateReceiver};
pub use store::{DiskStore, MemoryStore, SessionStore};
