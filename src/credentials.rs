/// Persisted OAuth credentials on top of the host key-value store
use crate::api::JsonObject;
use crate::error::SaveError;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Keys under which the three values live in the host store
pub mod storage_key {
    pub const REQUEST_TOKEN: &str = "request_token";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const USERNAME: &str = "username";
}

/// Durable string key-value storage
///
/// Production: window.localStorage
/// Testing: In-memory HashMap
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SaveError>;

    fn remove(&self, key: &str) -> Result<(), SaveError>;
}

/// In-memory store; single-threaded like the extension page it stands in for
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SaveError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Sole owner of the pending request token, access token and username
pub struct CredentialStore<S> {
    store: S,
    consumer_key: String,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S, consumer_key: impl Into<String>) -> Self {
        CredentialStore {
            store,
            consumer_key: consumer_key.into(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn is_authenticated(&self) -> bool {
        match self.store.get(storage_key::ACCESS_TOKEN) {
            Ok(token) => token.is_some(),
            Err(e) => {
                log::warn!("Treating unreadable credentials as signed out: {}", e);
                false
            }
        }
    }

    pub fn username(&self) -> Result<Option<String>, SaveError> {
        self.store.get(storage_key::USERNAME)
    }

    pub fn save_pending_request_token(&self, token: &str) -> Result<(), SaveError> {
        self.store.set(storage_key::REQUEST_TOKEN, token)
    }

    pub fn load_pending_request_token(&self) -> Result<Option<String>, SaveError> {
        self.store.get(storage_key::REQUEST_TOKEN)
    }

    pub fn clear_pending_request_token(&self) -> Result<(), SaveError> {
        self.store.remove(storage_key::REQUEST_TOKEN)
    }

    /// Store the result of a completed handshake
    ///
    /// The access token is written last: it is what `is_authenticated`
    /// looks at, so a reader never sees a token without its username.
    pub fn save_access_credentials(
        &self,
        access_token: &str,
        username: &str,
    ) -> Result<(), SaveError> {
        self.store.set(storage_key::USERNAME, username)?;
        if let Err(e) = self.store.set(storage_key::ACCESS_TOKEN, access_token) {
            if let Err(rollback) = self.store.remove(storage_key::USERNAME) {
                log::warn!("Could not roll back username: {}", rollback);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Attach `consumer_key` and `access_token` to an API payload
    ///
    /// Does not check `is_authenticated`; without a token the field is null
    /// and the service rejects the request.
    pub fn decorate_request(&self, mut payload: JsonObject) -> Result<JsonObject, SaveError> {
        let access_token = self
            .store
            .get(storage_key::ACCESS_TOKEN)?
            .map_or(Value::Null, Value::String);
        payload.insert(
            "consumer_key".to_string(),
            Value::String(self.consumer_key.clone()),
        );
        payload.insert("access_token".to_string(), access_token);
        Ok(payload)
    }
}
