//! The ordered collection of alerts shown in the notification panel.
//! Records are only ever mutated through `mark_read`, emptied wholesale
//! through `clear_all`, or replaced wholesale through `restore`. There is no
//! single-item delete.

use uuid::Uuid;

use crate::model::Notification;
use crate::store::{keys, KvStore};

pub struct Notifications<S: KvStore> {
    kv: S,
    records: Vec<Notification>,
}

impl<S: KvStore> Notifications<S> {
    /// Restore the notification list from `kv`, using `default` when nothing
    /// has been persisted yet (a fresh profile gets the seed alerts).
    pub fn open(kv: S, default: Vec<Notification>) -> Self {
        let records = kv.load(keys::NOTIFICATIONS, default);
        Self { kv, records }
    }

    /// Mark the matching record read. Unknown ids are a no-op, not an error:
    /// a stale view may still name a record that a clear or restore dropped.
    pub fn mark_read(&mut self, id: Uuid) {
        let mut changed = false;
        for record in &mut self.records {
            if record.id == id && !record.read {
                record.read = true;
                changed = true;
            }
        }
        if changed {
            self.kv.save(keys::NOTIFICATIONS, &self.records);
        }
    }

    /// Drop every record.
    pub fn clear_all(&mut self) {
        self.records.clear();
        self.kv.save(keys::NOTIFICATIONS, &self.records);
    }

    /// Replace the whole collection with `seed` (demo/admin reset).
    pub fn restore(&mut self, seed: Vec<Notification>) {
        self.records = seed;
        self.kv.save(keys::NOTIFICATIONS, &self.records);
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|n| !n.read).count()
    }

    pub fn all(&self) -> &[Notification] {
        &self.records
    }
}
