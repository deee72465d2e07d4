//! Durable session persistence.
//!
//! A signed-in session survives application restarts by being written
//! to a simple key/value store. The token and user record are stored
//! and removed together; a store holding one without the other is
//! treated as corrupt and cleared on load.

use crate::error::StorageError;
use crate::types::{Session, User};

const TOKEN_KEY: &str = "eventbook.token";
const USER_KEY: &str = "eventbook.user";

/// Synchronous key/value persistence for the session. Implementations
/// back onto whatever durable store the host platform offers.
pub trait SessionStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Write the session's token and user record. Both keys or neither:
/// if the user record fails to persist, the token is rolled back.
pub fn persist_session<S: SessionStorage>(
    storage: &S,
    session: &Session,
) -> Result<(), StorageError> {
    let user_json = serde_json::to_string(&session.user)
        .map_err(|e| StorageError::Corrupt(e.to_string()))?;
    storage.set(TOKEN_KEY, &session.token)?;
    if let Err(e) = storage.set(USER_KEY, &user_json) {
        let _ = storage.remove(TOKEN_KEY);
        return Err(e);
    }
    Ok(())
}

/// Remove both session keys.
pub fn clear_session<S: SessionStorage>(storage: &S) -> Result<(), StorageError> {
    storage.remove(TOKEN_KEY)?;
    storage.remove(USER_KEY)?;
    Ok(())
}

/// Load the persisted session, if a complete one exists.
///
/// A half-written store (token without user, or vice versa) and an
/// unparseable user record are both cleared and reported as absent
/// rather than surfaced as a broken session.
pub fn load_session<S: SessionStorage>(storage: &S) -> Result<Option<Session>, StorageError> {
    let token = storage.get(TOKEN_KEY)?;
    let user_json = storage.get(USER_KEY)?;
    match (token, user_json) {
        (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(_) => {
                clear_session(storage)?;
                Ok(None)
            }
        },
        (None, None) => Ok(None),
        _ => {
            clear_session(storage)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::types::UserId;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStorage {
        map: Mutex<HashMap<String, String>>,
    }

    impl SessionStorage for MapStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.map.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.map
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.map.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            user: User {
                id: UserId::new("u1"),
                name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                is_host: false,
            },
        }
    }

    #[test]
    fn round_trips_a_session() {
        let storage = MapStorage::default();
        persist_session(&storage, &session()).unwrap();
        let loaded = load_session(&storage).unwrap().unwrap();
        assert_eq!(loaded, session());
    }

    #[test]
    fn clear_removes_both_keys() {
        let storage = MapStorage::default();
        persist_session(&storage, &session()).unwrap();
        clear_session(&storage).unwrap();
        assert_eq!(load_session(&storage).unwrap(), None);
        assert!(storage.map.lock().unwrap().is_empty());
    }

    #[test]
    fn orphan_token_is_cleared_on_load() {
        let storage = MapStorage::default();
        storage.set(TOKEN_KEY, "dangling").unwrap();
        assert_eq!(load_session(&storage).unwrap(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_user_record_is_cleared_on_load() {
        let storage = MapStorage::default();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();
        assert_eq!(load_session(&storage).unwrap(), None);
        assert!(storage.map.lock().unwrap().is_empty());
    }
}
