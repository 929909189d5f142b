//! Authentication state shared between the HTTP client and the UI layer.

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use crate::domain::user::User;

/// Lifecycle of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// The startup who-am-I check has not completed yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
    /// The server rejected the session cookie; the user has to sign in again.
    Expired,
}

/// Shared session handle, passed around as `Arc<Session>`.
#[derive(Debug)]
pub struct Session {
    state: watch::Sender<SessionState>,
    error: Mutex<Option<String>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            state,
            error: Mutex::new(None),
        }
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        match &*self.state.borrow() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    pub fn sign_in(&self, user: User) {
        self.state.send_replace(SessionState::Authenticated(user));
    }

    pub fn sign_out(&self) {
        self.state.send_replace(SessionState::Anonymous);
    }

    /// Marks the session as rejected by the server.
    pub fn expire(&self) {
        let previous = self.state.send_replace(SessionState::Expired);
        if previous != SessionState::Expired {
            log::warn!("Session expired");
        }
    }

    /// Last authentication failure, independent of the lead list error.
    pub fn auth_error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_error(&self, message: impl Into<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            email: "sam@example.com".to_string(),
        }
    }

    #[test]
    fn starts_unknown() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Unknown);
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn sign_in_then_expire() {
        let session = Session::new();
        session.sign_in(user());
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), Some(user()));

        session.expire();
        assert_eq!(session.state(), SessionState::Expired);
        assert_eq!(session.current_user(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let session = Session::new();
        let mut receiver = session.subscribe();

        session.sign_in(user());
        receiver.changed().await.unwrap();
        assert!(matches!(
            *receiver.borrow_and_update(),
            SessionState::Authenticated(_)
        ));

        session.sign_out();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), SessionState::Anonymous);
    }

    #[test]
    fn auth_error_is_kept_until_cleared() {
        let session = Session::new();
        session.set_error("Invalid credentials");
        assert_eq!(session.auth_error().as_deref(), Some("Invalid credentials"));
        session.clear_error();
        assert_eq!(session.auth_error(), None);
    }
}
