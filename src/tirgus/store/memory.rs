use super::KvStore;
use crate::error::{Result, TirgusError};
use std::collections::HashMap;

/// In-memory snapshot storage for tests. Also doubles as the quota-exceeded
/// stand-in: with failing writes enabled every `write` errors, which the
/// typed `save` wrapper is expected to swallow.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        if self.fail_writes {
            return Err(TirgusError::Store(format!(
                "simulated write failure for key '{}'",
                key
            )));
        }
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
