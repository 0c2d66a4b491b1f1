//! # API Facade
//!
//! [`TirgusApi`] is the single entry point every UI talks to. It owns the
//! three state stores and the filter panel, accepts user intents as plain
//! method calls, and exposes exactly one read path: [`TirgusApi::view`],
//! which re-derives all four outputs from the current inputs on every call.
//!
//! ## What the API Does NOT Do
//!
//! - **Rendering**: it returns data structures, never strings for a terminal
//! - **Caching**: there is no stored derived state to go stale
//! - **Cross-store writes**: each intent touches exactly the store that owns
//!   the mutated collection
//!
//! ## Generic Over Storage and Sync
//!
//! `TirgusApi<S: KvStore, Y: FavoriteSync>` is generic over the persistence
//! backend and the favorite sync target:
//! - Production: `TirgusApi<FileStore, LocalOnlySync>`
//! - Testing: `TirgusApi<MemoryStore, RecordingSync>`
//!
//! Favorite toggles are local-first: the local commit always wins, the
//! remote mirror call is fire-and-forget and a failure is only logged.

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::engine::{derive_view, DerivedView, FilterCriteria, Tab, ViewState};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::listings::ListingBook;
use crate::model::{Listing, ListingId, Notification};
use crate::notifications::Notifications;
use crate::panel::{Draft, FilterPanel, PanelTab};
use crate::remote::{FavoriteSync, ListingSource};
use crate::store::KvStore;

pub struct TirgusApi<S: KvStore, Y: FavoriteSync> {
    listings: ListingBook<S>,
    favorites: Favorites<S>,
    notifications: Notifications<S>,
    sync: Y,
    user: String,
    today: NaiveDate,
    view: ViewState,
    panel: FilterPanel,
}

impl<S: KvStore, Y: FavoriteSync> TirgusApi<S, Y> {
    pub fn new(
        listings: ListingBook<S>,
        favorites: Favorites<S>,
        notifications: Notifications<S>,
        sync: Y,
        user: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            listings,
            favorites,
            notifications,
            sync,
            user: user.into(),
            today,
            view: ViewState::default(),
            panel: FilterPanel::new(),
        }
    }

    /// Recompute annotated listings, the filtered subset, dashboard stats
    /// and tab counts from the current stores and view state.
    pub fn view(&self) -> DerivedView<'_> {
        derive_view(
            self.listings.all(),
            self.favorites.ids(),
            &self.view,
            self.today,
        )
    }

    // --- search and tabs ---------------------------------------------------

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.search = text.into();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.view.tab = tab;
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    // --- favorites ---------------------------------------------------------

    /// Toggle a favorite locally, then mirror the change to the backend.
    /// The mirror call is best-effort: a failure is logged and the local
    /// state stands.
    pub fn toggle_favorite(&mut self, id: ListingId) {
        self.favorites.toggle(id);
        let outcome = if self.favorites.contains(id) {
            self.sync.favorite_added(&self.user, id)
        } else {
            self.sync.favorite_removed(&self.user, id)
        };
        if let Err(e) = outcome {
            warn!(listing = id, error = %e, "favorite sync failed, keeping local state");
        }
    }

    pub fn is_favorite(&self, id: ListingId) -> bool {
        self.favorites.contains(id)
    }

    // --- filter panel ------------------------------------------------------

    pub fn open_filters(&mut self) {
        self.panel.open(self.view.criteria.as_ref());
    }

    pub fn select_filter_tab(&mut self, tab: PanelTab) {
        self.panel.select_tab(tab);
    }

    pub fn filter_draft_mut(&mut self) -> Option<&mut Draft> {
        self.panel.draft_mut()
    }

    /// Commit the panel draft as the new criteria and close the panel.
    pub fn apply_filters(&mut self) {
        if let Some(criteria) = self.panel.apply() {
            self.view.criteria = Some(criteria);
        }
    }

    pub fn reset_filter_draft(&mut self) {
        self.panel.reset();
    }

    /// Close the panel without committing the draft.
    pub fn cancel_filters(&mut self) {
        self.panel.close();
    }

    /// Drop the committed criteria entirely ("Clear Filters").
    pub fn clear_filters(&mut self) {
        self.view.criteria = None;
    }

    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.view.criteria.as_ref()
    }

    pub fn filters_open(&self) -> bool {
        self.panel.is_open()
    }

    // --- notifications -----------------------------------------------------

    pub fn mark_notification_read(&mut self, id: Uuid) {
        self.notifications.mark_read(id);
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear_all();
    }

    pub fn restore_notifications(&mut self, seed: Vec<Notification>) {
        self.notifications.restore(seed);
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.all()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    // --- listings ----------------------------------------------------------

    /// Detail lookup. `None` is the user-visible not-found state, not a
    /// fault.
    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(id)
    }

    pub fn refresh_listings(&mut self, source: &impl ListingSource) -> Result<usize> {
        self.listings.refresh(source)
    }

    pub fn set_hidden(&mut self, id: ListingId, hidden: bool) {
        self.listings.set_hidden(id, hidden);
    }
}
