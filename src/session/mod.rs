//! Session lifecycle: credential storage, decoding and expiry
//!
//! `SessionManager` ties the pieces together and is handed to everything that
//! needs the session. There is no process-wide session state.

pub mod claims;
pub mod display_name;
pub mod scheduler;
pub mod store;

use std::sync::Arc;

pub use claims::{Role, Session};
#[cfg(test)]
pub use claims::encode_test_token;
pub use scheduler::{AutoLogout, Scheduled};
#[cfg(test)]
pub use store::MemoryTokenStore;
pub use store::{FileTokenStore, TokenStore};

use crate::error::{DecodeError, Result};
use crate::router::Navigator;

/// Owner of the token store, navigator and auto-logout timer.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    auto_logout: AutoLogout,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        let auto_logout = AutoLogout::new(Arc::clone(&store), Arc::clone(&navigator));
        Self {
            store,
            navigator,
            auto_logout,
        }
    }

    /// Arm auto-logout from whatever credential is stored at startup.
    pub fn init(&self) -> Scheduled {
        self.auto_logout.schedule()
    }

    /// Decode the stored credential. Never cached.
    pub fn current(&self) -> std::result::Result<Session, DecodeError> {
        Session::from_stored(self.store.get())
    }

    /// Replace the stored credential and re-arm the timer for it.
    pub fn begin(&self, credential: &str) -> Result<Scheduled> {
        self.store.set(credential)?;
        Ok(self.auto_logout.schedule())
    }

    /// End the session: cancel the timer, clear the store, go to login.
    pub fn logout(&self) -> Result<()> {
        self.auto_logout.logout()
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RecordingNavigator;
    use serde_json::json;

    fn manager(token: Option<String>) -> (Arc<MemoryTokenStore>, Arc<RecordingNavigator>, SessionManager) {
        let store = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        let nav = Arc::new(RecordingNavigator::new());
        let manager = SessionManager::new(store.clone(), nav.clone());
        (store, nav, manager)
    }

    #[tokio::test]
    async fn test_init_clears_expired_credential() {
        let token = encode_test_token(&json!({ "userType": "ADMIN", "exp": 1 }));
        let (store, nav, manager) = manager(Some(token));

        assert_eq!(manager.init(), Scheduled::LoggedOut);
        assert!(store.get().is_none());
        assert_eq!(nav.last(), Some("/"));
        assert_eq!(manager.current().unwrap_err(), DecodeError::Missing);
    }

    #[tokio::test]
    async fn test_begin_replaces_credential() {
        let (_store, _nav, manager) = manager(None);
        let first = encode_test_token(&json!({ "userType": "ADMIN", "sub": "a@x.org" }));
        let second = encode_test_token(&json!({ "userType": "VOLUNTEER", "sub": "v@x.org" }));

        manager.begin(&first).unwrap();
        assert_eq!(manager.current().unwrap().role, Role::Admin);

        manager.begin(&second).unwrap();
        let session = manager.current().unwrap();
        assert_eq!(session.role, Role::Volunteer);
        assert_eq!(session.display_name, "v");
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let token = encode_test_token(&json!({ "userType": "ADMIN" }));
        let (store, nav, manager) = manager(Some(token));

        manager.logout().unwrap();
        manager.logout().unwrap();
        assert!(store.get().is_none());
        assert_eq!(nav.count("/"), 2);
    }
}
