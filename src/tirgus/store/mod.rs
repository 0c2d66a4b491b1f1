//! # Storage Layer
//!
//! This module defines the persistence abstraction for tirgus. Every store
//! (listings, favorites, notifications) snapshots its whole collection as a
//! JSON value under a well-known key; the [`KvStore`] trait hides where those
//! snapshots live.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemoryStore` (no filesystem needed)
//! - Allow **future backends** without changing store logic
//! - Keep the derivation engine **completely decoupled** from persistence
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage, one `<key>.json` per
//!   key under the data directory
//! - [`memory::MemoryStore`]: In-memory storage for tests, including a
//!   failing-writes mode
//!
//! ## Forgiveness Policy
//!
//! The typed [`KvStore::load`]/[`KvStore::save`] entry points never surface
//! errors. A missing or corrupt snapshot loads as the caller's default, and a
//! failed write is logged and dropped; the in-memory collection a store holds
//! remains the authoritative copy for the running session either way. The raw
//! `read`/`write` methods the backends implement do return [`Result`], so a
//! backend can still report *why* a snapshot was unreadable.
//!
//! ## Listing Id Normalization
//!
//! Snapshots written by earlier versions round-tripped listing ids through a
//! string-keyed format, so a stored listing may carry `"id": "3"` instead of
//! `"id": 3`. Loading the [`keys::LISTINGS`] key coerces textual ids back to
//! numbers before typed deserialization; all other fields pass through
//! untouched, and numeric ids are left as-is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Well-known snapshot keys.
pub mod keys {
    pub const LISTINGS: &str = "listings";
    pub const FAVORITES: &str = "favorites";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Abstract interface for JSON snapshot storage.
///
/// Backends implement the raw `read`/`write` pair; the typed, failure-
/// swallowing `load`/`save` wrappers are shared across backends.
pub trait KvStore {
    /// Read the raw payload stored under `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write the raw payload for `key`, replacing any previous value.
    fn write(&mut self, key: &str, payload: &str) -> Result<()>;

    /// Load the value stored under `key`, falling back to `default` when the
    /// key is absent or the stored payload does not deserialize.
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!(key, error = %e, "failed to read snapshot, using default");
                return default;
            }
        };

        let mut value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored snapshot is not valid JSON, using default");
                return default;
            }
        };

        if key == keys::LISTINGS {
            normalize_listing_ids(&mut value);
        }

        match serde_json::from_value(value) {
            Ok(typed) => typed,
            Err(e) => {
                warn!(key, error = %e, "stored snapshot has the wrong shape, using default");
                default
            }
        }
    }

    /// Persist `value` under `key`. Serialization or write failures are
    /// logged and dropped; the caller's in-memory copy stays authoritative.
    fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        let payload = match serde_json::to_string_pretty(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize snapshot, skipping write");
                return;
            }
        };
        if let Err(e) = self.write(key, &payload) {
            warn!(key, error = %e, "failed to persist snapshot, in-memory state unchanged");
        }
    }
}

/// Coerce textual `id` fields of a listing array to numbers, in place.
///
/// Ids that are not parseable as integers are left alone; typed
/// deserialization will then reject the snapshot and the caller falls back
/// to its default.
fn normalize_listing_ids(value: &mut Value) {
    let Value::Array(items) = value else {
        return;
    };
    for item in items {
        let Some(record) = item.as_object_mut() else {
            continue;
        };
        let Some(id) = record.get("id") else {
            continue;
        };
        if let Some(text) = id.as_str() {
            if let Ok(numeric) = text.parse::<i64>() {
                record.insert("id".to_string(), Value::from(numeric));
            }
        }
    }
}
