//! End-to-end flows over the real file-backed stores: everything a session
//! does (browse, search, filter, favorite, notifications) plus what the next
//! session sees after a restart.

use std::path::Path;

use tirgus::api::TirgusApi;
use tirgus::engine::Tab;
use tirgus::favorites::Favorites;
use tirgus::listings::ListingBook;
use tirgus::notifications::Notifications;
use tirgus::remote::RecordingSync;
use tirgus::seed;
use tirgus::store::fs::FileStore;

fn open_api(data_dir: &Path) -> TirgusApi<FileStore, RecordingSync> {
    TirgusApi::new(
        ListingBook::open(FileStore::new(data_dir), seed::listings()),
        Favorites::open(FileStore::new(data_dir)),
        Notifications::open(FileStore::new(data_dir), seed::notifications()),
        RecordingSync::new(),
        "demo",
        seed::reference_date(),
    )
}

#[test]
fn fresh_profile_shows_the_seed_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let api = open_api(dir.path());

    let view = api.view();
    assert_eq!(view.stats.total_listings, 4);
    assert_eq!(view.stats.new_today, 1);
    assert_eq!(view.stats.saved_count, 0);
    assert_eq!(view.stats.average_price.cars, 21_750);
    assert_eq!(view.stats.average_price.real_estate, 215_000);
    assert_eq!(view.tab_counts.all, 4);
    assert_eq!(view.tab_counts.cars, 2);
    assert_eq!(view.tab_counts.real_estate, 2);
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut api = open_api(dir.path());
        api.toggle_favorite(1);
        api.toggle_favorite(3);
        api.toggle_favorite(3); // changed my mind
        api.toggle_favorite(4);
    }

    let api = open_api(dir.path());
    let view = api.view();
    assert_eq!(view.stats.saved_count, 2);
    for entry in &view.annotated {
        let expected = entry.listing.id == 1 || entry.listing.id == 4;
        assert_eq!(entry.is_favorite, expected);
    }
}

#[test]
fn filter_state_is_per_session_but_listings_persist() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut api = open_api(dir.path());
        api.set_search("riga");
        api.set_tab(Tab::Cars);
        assert_eq!(api.view().filtered.len(), 1);
    }

    // A new session starts with a clean view over the same data.
    let api = open_api(dir.path());
    let view = api.view();
    assert_eq!(view.filtered.len(), 4);
    assert_eq!(view.stats.total_listings, 4);
}

#[test]
fn the_full_browse_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut api = open_api(dir.path());

    // Search narrows by location text.
    api.set_search("riga");
    let riga: Vec<i64> = api.view().filtered.iter().map(|e| e.listing.id).collect();
    assert_eq!(riga, vec![1, 2]);

    // The cars tab narrows further without touching the badges.
    api.set_tab(Tab::Cars);
    let view = api.view();
    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.tab_counts.cars, 2);

    // The price window from the filter panel stacks on top.
    api.open_filters();
    if let Some(draft) = api.filter_draft_mut() {
        draft.price_min = "20000".to_string();
        draft.price_max = "30000".to_string();
    }
    api.apply_filters();
    let view = api.view();
    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.filtered[0].listing.title, "BMW X5 3.0d xDrive");

    // Clearing the search and filters restores the tab view.
    api.set_search("");
    api.clear_filters();
    assert_eq!(api.view().filtered.len(), 2);
}

#[test]
fn favorite_toggles_are_mirrored_and_survive_backend_failures() {
    let dir = tempfile::tempdir().unwrap();

    let mut api = TirgusApi::new(
        ListingBook::open(FileStore::new(dir.path()), seed::listings()),
        Favorites::open(FileStore::new(dir.path())),
        Notifications::open(FileStore::new(dir.path()), seed::notifications()),
        RecordingSync::new(),
        "alice",
        seed::reference_date(),
    );
    api.toggle_favorite(2);

    let mut failing = TirgusApi::new(
        ListingBook::open(FileStore::new(dir.path()), seed::listings()),
        Favorites::open(FileStore::new(dir.path())),
        Notifications::open(FileStore::new(dir.path()), seed::notifications()),
        RecordingSync::failing(),
        "alice",
        seed::reference_date(),
    );
    // The backend is down; the local toggle still lands and persists.
    failing.toggle_favorite(1);
    assert!(failing.is_favorite(1));

    let reopened = open_api(dir.path());
    assert!(reopened.is_favorite(1));
    assert!(reopened.is_favorite(2));
}

#[test]
fn notifications_clear_restore_and_persist() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut api = open_api(dir.path());
        assert_eq!(api.unread_count(), 1);
        api.clear_notifications();
        assert_eq!(api.unread_count(), 0);
    }

    // The cleared list is what the next session sees.
    {
        let mut api = open_api(dir.path());
        assert!(api.notifications().is_empty());

        let seeded = seed::notifications();
        let expected_unread = seeded.iter().filter(|n| !n.read).count();
        api.restore_notifications(seeded);
        assert_eq!(api.unread_count(), expected_unread);

        let unread_id = api
            .notifications()
            .iter()
            .find(|n| !n.read)
            .map(|n| n.id)
            .unwrap();
        api.mark_notification_read(unread_id);
        assert_eq!(api.unread_count(), 0);
    }

    let api = open_api(dir.path());
    assert_eq!(api.unread_count(), 0);
    assert_eq!(api.notifications().len(), 2);
}

#[test]
fn hidden_listings_stay_hidden_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut api = open_api(dir.path());
        api.set_hidden(2, true);
        assert_eq!(api.view().stats.total_listings, 3);
    }

    let api = open_api(dir.path());
    let view = api.view();
    assert_eq!(view.stats.total_listings, 3);
    assert_eq!(view.tab_counts.real_estate, 1);
    assert!(view.annotated.iter().all(|e| e.listing.id != 2));
    // The record itself is still there for the admin path.
    assert!(api.listing(2).is_some());
}
