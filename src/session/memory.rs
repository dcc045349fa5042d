// In-memory session store for tests and embedded shells
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

use super::{SessionKey, SessionStore};
use crate::error::KioskError;

#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<SessionKey, Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&self, key: SessionKey, value: Value) -> Result<(), KioskError> {
        self.entries.lock().insert(key, value);
        Ok(())
    }

    fn get(&self, key: SessionKey) -> Result<Option<Value>, KioskError> {
        Ok(self.entries.lock().get(&key).cloned())
    }

    fn remove(&self, key: SessionKey) -> Result<(), KioskError> {
        self.entries.lock().remove(&key);
        Ok(())
    }

    fn clear_all(&self) -> Result<(), KioskError> {
        self.entries.lock().clear();
        Ok(())
    }
}
