//! Operator identity lookup
//!
//! The console never reads ambient storage on its own; callers resolve an
//! [`Operator`] from a [`SessionStore`] once and pass it to the actions that
//! need it.

use crate::types::Operator;
use crate::{Error, Result};
use std::collections::HashMap;

/// Session key holding the operator id
pub const ADMIN_ID_KEY: &str = "adminId";
/// Session key holding the operator name
pub const ADMIN_NAME_KEY: &str = "adminName";
/// Session key holding the operator phone
pub const ADMIN_PHONE_KEY: &str = "adminPhone";

/// String-keyed session storage
pub trait SessionStore {
    /// Look up a value by key
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`MemorySessionStore::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl From<&Operator> for MemorySessionStore {
    fn from(operator: &Operator) -> Self {
        Self::new()
            .with(ADMIN_ID_KEY, operator.id.clone())
            .with(ADMIN_NAME_KEY, operator.name.clone())
            .with(ADMIN_PHONE_KEY, operator.phone.clone())
    }
}

impl Operator {
    /// Resolve the operator identity from a session store
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOperator`] naming the first key that is absent or blank.
    pub fn from_session(store: &dyn SessionStore) -> Result<Self> {
        let lookup = |key: &str| {
            store
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::MissingOperator {
                    key: key.to_string(),
                })
        };

        Ok(Self {
            id: lookup(ADMIN_ID_KEY)?,
            name: lookup(ADMIN_NAME_KEY)?,
            phone: lookup(ADMIN_PHONE_KEY)?,
        })
    }
}
