//! The raw listing collection. The repository owns the records and their
//! administrative flags; it is read, never written, by the derivation engine.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Listing, ListingId};
use crate::remote::ListingSource;
use crate::store::{keys, KvStore};

pub struct ListingBook<S: KvStore> {
    kv: S,
    listings: Vec<Listing>,
}

impl<S: KvStore> ListingBook<S> {
    /// Restore the collection from `kv`, using `default` (normally the seed
    /// set) when nothing has been persisted yet.
    pub fn open(kv: S, default: Vec<Listing>) -> Self {
        let listings = kv.load(keys::LISTINGS, default);
        Self { kv, listings }
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Replace the collection wholesale from `source` and persist the result.
    /// Returns the new listing count.
    pub fn refresh(&mut self, source: &impl ListingSource) -> Result<usize> {
        let fetched = source.fetch_all()?;
        info!(count = fetched.len(), "refreshed listings from source");
        self.listings = fetched;
        self.kv.save(keys::LISTINGS, &self.listings);
        Ok(self.listings.len())
    }

    /// Set the administrative visibility flag. Unknown ids are a no-op.
    pub fn set_hidden(&mut self, id: ListingId, hidden: bool) {
        let Some(listing) = self.listings.iter_mut().find(|l| l.id == id) else {
            debug!(listing = id, "set_hidden on unknown listing ignored");
            return;
        };
        if listing.hidden != hidden {
            listing.hidden = hidden;
            self.kv.save(keys::LISTINGS, &self.listings);
        }
    }
}
