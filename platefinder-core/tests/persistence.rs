use platefinder_common::{CorruptPolicy, DisplayConfig, PlateFinderError};
use platefinder_core::model::RestaurantRef;
use platefinder_core::{
    FileStore, KeyValueStore, RestaurantDetail, RestaurantEntry, RestaurantSummary, SessionState,
    SessionStore, SessionView,
};

fn entry(id: u64) -> RestaurantEntry {
    RestaurantEntry {
        restaurant: RestaurantSummary {
            r: RestaurantRef { res_id: id },
            name: format!("R{id}"),
            phone_numbers: String::new(),
            thumb: None,
        },
    }
}

#[test]
fn session_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let first = SessionStore::new(FileStore::new(tmp.path()), "searchHistory", CorruptPolicy::Reset);
    assert_eq!(first.load().unwrap(), SessionState::default());
    first
        .update(|s| {
            s.restaurants = (1..=9).map(entry).collect();
            s.page = 2;
        })
        .unwrap();
    drop(first);

    let second = SessionStore::new(FileStore::new(tmp.path()), "searchHistory", CorruptPolicy::Reset);
    let restored = second.load().unwrap();
    assert_eq!(restored.page, 2);
    assert_eq!(restored.visible(7).len(), 2);
    assert!(tmp.path().join("searchHistory.json").exists());
}

#[test]
fn stored_record_uses_camel_case_detail_key() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(tmp.path());
    let sessions = SessionStore::new(store.clone(), "searchHistory", CorruptPolicy::Reset);
    sessions.update(|s| s.restaurants.push(entry(5))).unwrap();

    let raw = store.get("searchHistory").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("restaurantInfo").is_some());
    assert_eq!(value["restaurants"][0]["restaurant"]["R"]["res_id"], 5);
}

#[test]
fn text_rating_is_stored_and_shown_as_sent() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(tmp.path());
    let sessions = SessionStore::new(store.clone(), "searchHistory", CorruptPolicy::Reset);
    let detail: RestaurantDetail =
        serde_json::from_str(r#"{"name": "Otto", "user_rating": {"aggregate_rating": "4.0"}}"#).unwrap();
    sessions
        .update(|s| {
            s.restaurants.push(entry(5));
            s.restaurant_info = Some(detail.clone());
        })
        .unwrap();

    let raw = store.get("searchHistory").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["restaurantInfo"]["user_rating"]["aggregate_rating"], "4.0");

    let reopened = SessionStore::new(FileStore::new(tmp.path()), "searchHistory", CorruptPolicy::Reset);
    let restored = reopened.load().unwrap();
    assert_eq!(restored.restaurant_info, Some(detail));
    let view = SessionView::project(&restored, &DisplayConfig::default());
    assert_eq!(view.detail.unwrap().rating_label, "4.0 stars.");
}

#[test]
fn corrupted_file_with_error_policy() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("searchHistory.json"), "{\"page\": \"two\"").unwrap();
    let sessions = SessionStore::new(FileStore::new(tmp.path()), "searchHistory", CorruptPolicy::Error);
    assert!(matches!(sessions.load(), Err(PlateFinderError::MalformedStoredState(_))));
}
