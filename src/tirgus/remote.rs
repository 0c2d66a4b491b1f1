//! Boundary traits for the collaborators the core talks to but does not own:
//! the listing source that feeds the repository and the backend that mirrors
//! favorite changes.
//!
//! Favorite sync is strictly local-first: the toggle commits in memory (and
//! to the local snapshot) before the remote call is attempted, and a remote
//! failure is logged by the caller, never rolled back.

use std::cell::RefCell;

use tracing::debug;

use crate::error::Result;
use crate::model::{Listing, ListingId};

/// Where listings come from. `fetch_all` feeds initial load and refresh;
/// `fetch_by_id` backs the detail view.
pub trait ListingSource {
    fn fetch_all(&self) -> Result<Vec<Listing>>;
    fn fetch_by_id(&self, id: ListingId) -> Result<Option<Listing>>;
}

/// Best-effort mirror of favorite changes to a backend account.
pub trait FavoriteSync {
    fn favorite_added(&self, user: &str, id: ListingId) -> Result<()>;
    fn favorite_removed(&self, user: &str, id: ListingId) -> Result<()>;
}

/// Sync target used when no account backend is configured: accepts every
/// change and leaves a debug trace, nothing more.
#[derive(Debug, Default)]
pub struct LocalOnlySync;

impl LocalOnlySync {
    pub fn new() -> Self {
        Self
    }
}

impl FavoriteSync for LocalOnlySync {
    fn favorite_added(&self, user: &str, id: ListingId) -> Result<()> {
        debug!(user, listing = id, "favorite added (local only)");
        Ok(())
    }

    fn favorite_removed(&self, user: &str, id: ListingId) -> Result<()> {
        debug!(user, listing = id, "favorite removed (local only)");
        Ok(())
    }
}

/// One observed sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Added { user: String, id: ListingId },
    Removed { user: String, id: ListingId },
}

/// Test double that records every sync call and can be told to fail, for
/// exercising the local-first policy.
#[derive(Debug, Default)]
pub struct RecordingSync {
    events: RefCell<Vec<SyncEvent>>,
    fail: bool,
}

impl RecordingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.borrow().clone()
    }
}

impl FavoriteSync for RecordingSync {
    fn favorite_added(&self, user: &str, id: ListingId) -> Result<()> {
        if self.fail {
            return Err(crate::error::TirgusError::Source(
                "favorite backend unreachable".to_string(),
            ));
        }
        self.events.borrow_mut().push(SyncEvent::Added {
            user: user.to_string(),
            id,
        });
        Ok(())
    }

    fn favorite_removed(&self, user: &str, id: ListingId) -> Result<()> {
        if self.fail {
            return Err(crate::error::TirgusError::Source(
                "favorite backend unreachable".to_string(),
            ));
        }
        self.events.borrow_mut().push(SyncEvent::Removed {
            user: user.to_string(),
            id,
        });
        Ok(())
    }
}
