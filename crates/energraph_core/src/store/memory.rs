//! In-memory reference implementation of the model store.

use crate::model::graph::Model;
use crate::store::{ModelStore, StoreError, StoreResult};
use std::collections::HashMap;

/// Process-local store holding one model per session key.
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    models: HashMap<String, Model>,
}

impl InMemoryModelStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `model` under `session`.
    ///
    /// # Errors
    /// - [`StoreError::SessionExists`] when the key is already in use.
    pub fn open_session(&mut self, session: impl Into<String>, model: Model) -> StoreResult<()> {
        let session = session.into();
        if self.models.contains_key(&session) {
            return Err(StoreError::SessionExists(session));
        }
        self.models.insert(session, model);
        Ok(())
    }

    /// Unloads and returns the session's model, `None` when absent.
    pub fn close_session(&mut self, session: &str) -> Option<Model> {
        self.models.remove(session)
    }

    /// Active session keys in arbitrary order.
    pub fn sessions(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|key| key.as_str())
    }
}

impl ModelStore for InMemoryModelStore {
    fn model(&self, session: &str) -> StoreResult<&Model> {
        self.models
            .get(session)
            .ok_or_else(|| StoreError::SessionNotFound(session.to_string()))
    }

    fn model_mut(&mut self, session: &str) -> StoreResult<&mut Model> {
        self.models
            .get_mut(session)
            .ok_or_else(|| StoreError::SessionNotFound(session.to_string()))
    }
}
