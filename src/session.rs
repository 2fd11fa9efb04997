//! Session state.
//!
//! The session lives in a key-value store (browser `localStorage` in the
//! app) and is re-derived from it at mount and on every cross-tab storage
//! change. Nothing here checks expiry or refreshes the token.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::TripError;
use crate::gateway::Gateway;
use crate::models::{Credentials, Registration};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const NAME_KEY: &str = "name";
pub const EMAIL_KEY: &str = "email";
pub const IS_ADMIN_KEY: &str = "isAdmin";

pub const SESSION_KEYS: [&str; 4] = [AUTH_TOKEN_KEY, NAME_KEY, EMAIL_KEY, IS_ADMIN_KEY];

/// Read/write interface over the persisted session entries.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TripError>;
    fn set(&self, key: &str, value: &str) -> Result<(), TripError>;
    fn remove(&self, key: &str) -> Result<(), TripError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, TripError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TripError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TripError> {
        (**self).remove(key)
    }
}

/// `window.localStorage`, looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, TripError> {
        web_sys::window()
            .ok_or_else(|| TripError::Browser("no window".to_string()))?
            .local_storage()
            .map_err(|e| TripError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| TripError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TripError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| TripError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TripError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| TripError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), TripError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| TripError::Storage(format!("{:?}", e)))
    }
}

/// In-process store, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TripError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TripError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TripError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Cached view of the persisted session entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl Session {
    /// Re-derive every field from the store. Missing entries read as empty.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, TripError> {
        Ok(Self {
            token: store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.is_empty()),
            name: store.get(NAME_KEY)?.unwrap_or_default(),
            email: store.get(EMAIL_KEY)?.unwrap_or_default(),
            is_admin: store.get(IS_ADMIN_KEY)?.as_deref() == Some("true"),
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// First character of the display name, for the account avatar.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

/// Log in against the backend and persist the session on success.
///
/// A response without both a token and a name is a failure. On any
/// failure the store is left untouched.
pub async fn login<G, S>(
    gateway: &G,
    store: &S,
    credentials: &Credentials,
) -> Result<Session, TripError>
where
    G: Gateway + ?Sized,
    S: KeyValueStore + ?Sized,
{
    info!("Logging in {}", credentials.email);
    let response = gateway.login(credentials).await.map_err(|e| {
        warn!("Login failed for {}: {}", credentials.email, e);
        e
    })?;

    let (token, name) = match (response.token.as_deref(), response.name.as_deref()) {
        (Some(token), Some(name)) if !token.is_empty() && !name.is_empty() => {
            (token.to_string(), name.to_string())
        }
        _ => {
            warn!("Login response for {} carried no token", credentials.email);
            return Err(TripError::Auth(
                "Authentication failed. No token received.".to_string(),
            ));
        }
    };
    let is_admin = response.admin_claim();

    write_all(
        store,
        &[
            (AUTH_TOKEN_KEY, token.as_str()),
            (NAME_KEY, name.as_str()),
            (EMAIL_KEY, credentials.email.as_str()),
            (IS_ADMIN_KEY, if is_admin { "true" } else { "false" }),
        ],
    )?;

    info!("Logged in as {} (admin: {})", name, is_admin);
    Ok(Session {
        token: Some(token),
        name,
        email: credentials.email.clone(),
        is_admin,
    })
}

/// Write every entry or none. A failed write puts back whatever the
/// touched keys held before.
fn write_all<S>(store: &S, entries: &[(&str, &str)]) -> Result<(), TripError>
where
    S: KeyValueStore + ?Sized,
{
    let previous = entries
        .iter()
        .map(|(key, _)| store.get(key).map(|value| (*key, value)))
        .collect::<Result<Vec<_>, _>>()?;

    for (key, value) in entries {
        if let Err(e) = store.set(key, value) {
            warn!("Writing {} failed, restoring previous session: {}", key, e);
            for (key, value) in &previous {
                let restored = match value {
                    Some(value) => store.set(key, value),
                    None => store.remove(key),
                };
                if let Err(e) = restored {
                    warn!("Restoring {} failed: {}", key, e);
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Create an account. Does not log in.
pub async fn register<G>(gateway: &G, registration: &Registration) -> Result<String, TripError>
where
    G: Gateway + ?Sized,
{
    info!("Registering {}", registration.email);
    let body = gateway.register(registration).await?;
    Ok(body
        .message
        .unwrap_or_else(|| "Registration successful".to_string()))
}

/// Clear every session entry if the user confirms. Returns whether it did.
pub fn logout(
    store: &impl KeyValueStore,
    confirm: impl FnOnce() -> bool,
) -> Result<bool, TripError> {
    if !confirm() {
        return Ok(false);
    }
    for key in SESSION_KEYS {
        store.remove(key)?;
    }
    info!("Logged out");
    Ok(true)
}

/// Login form model: input fields plus the inline error and busy flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish<T>(&mut self, outcome: &Result<T, TripError>) {
        self.loading = false;
        self.error = match outcome {
            Ok(_) => None,
            Err(TripError::Api { message, .. }) => Some(message.clone()),
            Err(TripError::Auth(message)) => Some(message.clone()),
            Err(_) => Some("Error during login".to_string()),
        };
    }
}

/// Registration form model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, TripError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(TripError::Validation("All fields are required".to_string()));
        }
        if !email.contains('@') {
            return Err(TripError::Validation("Please enter a valid email".to_string()));
        }
        Ok(Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
