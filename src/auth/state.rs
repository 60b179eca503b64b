use tokio::sync::watch;

/// Login state as published to the host's state container.
///
/// A stored session record is the only thing that makes the client
/// `Authenticated`; there is no expiry tracking, the server invalidates
/// stale tokens on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

impl AuthState {
    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

/// Receiver half of the auth-state feed.
///
/// `borrow()` answers "what is the state now"; awaiting `changed()` wakes the
/// subscriber on the next login or logout transition.
pub type AuthStateReceiver = watch::Receiver<AuthState>;
