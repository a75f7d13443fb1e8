use std::sync::Arc;

use weatherhub_core::StorageError;

use crate::storage::KeyValueStore;

/// Key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";
/// Key holding the display-only identity marker (the user's email).
pub const USER_KEY: &str = "user";
/// Legacy key cleared on logout.
pub const USER_ID_KEY: &str = "userId";

/// Session state shared by the API client and the application flows.
///
/// Every accessor goes to the backing store, so a token written after a
/// client was built is still seen by that client's next request.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Drop the credential only. The identity marker is left alone.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)
    }

    /// Identity marker shown in the nav bar.
    pub fn user(&self) -> Result<Option<String>, StorageError> {
        self.store.get(USER_KEY)
    }

    pub fn set_user(&self, email: &str) -> Result<(), StorageError> {
        self.store.set(USER_KEY, email)
    }

    /// True when a credential is stored.
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some())
    }

    /// True when an identity marker is stored. This is what the nav bar
    /// keys its login/logout toggle on, independent of the credential.
    pub fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.user()?.is_some())
    }

    /// Explicit logout: clears the identity marker, the credential and the
    /// legacy user id.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::storage::MemoryStore;

    fn session() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Session::new(store.clone()), store)
    }

    #[test]
    fn test_token_lifecycle() {
        let (session, _) = session();
        assert!(!session.is_authenticated().unwrap());

        session.set_token("abc").unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("abc"));
        assert!(session.is_authenticated().unwrap());

        session.clear_token().unwrap();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let (session, _) = session();
        session.set_token("").unwrap();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn test_clear_token_keeps_identity_marker() {
        let (session, _) = session();
        session.set_token("abc").unwrap();
        session.set_user("a@b.com").unwrap();

        session.clear_token().unwrap();
        assert!(!session.is_authenticated().unwrap());
        assert!(session.is_logged_in().unwrap());
    }

    #[test]
    fn test_logout_clears_everything() {
        let (session, store) = session();
        session.set_token("abc").unwrap();
        session.set_user("a@b.com").unwrap();
        store.set(USER_ID_KEY, "42").unwrap();

        session.logout().unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
        assert_eq!(store.get(USER_ID_KEY).unwrap(), None);
    }

    #[test]
    fn test_clones_share_the_store() {
        let (session, _) = session();
        let other = session.clone();
        other.set_token("late").unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("late"));
    }
}
