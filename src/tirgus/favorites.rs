//! The set of listings the user has marked favorite. Insertion order is kept
//! so the favorites page stays stable across toggles; membership is what
//! matters for correctness.

use crate::model::ListingId;
use crate::store::{keys, KvStore};

pub struct Favorites<S: KvStore> {
    kv: S,
    ids: Vec<ListingId>,
}

impl<S: KvStore> Favorites<S> {
    /// Restore the favorite set from `kv`, starting empty on a fresh profile.
    pub fn open(kv: S) -> Self {
        let ids = kv.load(keys::FAVORITES, Vec::new());
        Self { kv, ids }
    }

    /// Add `id` if absent, remove it if present. Two toggles of the same id
    /// always restore the previous set. The updated set is persisted
    /// immediately; the in-memory set is authoritative regardless.
    pub fn toggle(&mut self, id: ListingId) {
        if let Some(pos) = self.ids.iter().position(|fav| *fav == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
        self.kv.save(keys::FAVORITES, &self.ids);
    }

    pub fn contains(&self, id: ListingId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ListingId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::open(MemoryStore::new());
        favorites.toggle(1);
        assert!(favorites.contains(1));
        favorites.toggle(1);
        assert!(!favorites.contains(1));
    }

    #[test]
    fn double_toggle_restores_the_prior_set() {
        let mut favorites = Favorites::open(MemoryStore::new());
        favorites.toggle(1);
        favorites.toggle(4);
        let before: Vec<_> = favorites.ids().to_vec();

        favorites.toggle(2);
        favorites.toggle(2);

        let mut after: Vec<_> = favorites.ids().to_vec();
        let mut expected = before;
        after.sort_unstable();
        expected.sort_unstable();
        assert_eq!(after, expected);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut favorites = Favorites::open(MemoryStore::new());
        favorites.toggle(3);
        favorites.toggle(1);
        favorites.toggle(2);
        assert_eq!(favorites.ids(), &[3, 1, 2]);
    }

    #[test]
    fn toggles_survive_a_reopen() {
        let mut favorites = Favorites::open(MemoryStore::new());
        favorites.toggle(2);
        favorites.toggle(4);

        let kv = kv_of(favorites);
        let reopened = Favorites::open(kv);
        assert_eq!(reopened.ids(), &[2, 4]);
    }

    #[test]
    fn failed_persistence_keeps_the_in_memory_set() {
        let mut kv = MemoryStore::new();
        kv.set_failing_writes(true);
        let mut favorites = Favorites::open(kv);
        favorites.toggle(1);
        assert!(favorites.contains(1));
        assert_eq!(favorites.len(), 1);
    }

    fn kv_of<S: KvStore>(favorites: Favorites<S>) -> S {
        favorites.kv
    }
}
