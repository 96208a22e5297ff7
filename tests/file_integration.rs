//! File store integration tests
//!
//! Exercises the JSON-file backend through the full stack: persistence
//! across store instances, atomic writes, and the same live-feed and
//! controller behavior the memory backend provides.

use std::time::Duration;
use taskflow_event::{
    EventController, EventDraft, EventError, EventService, FileConfig, FileStore,
};
use tokio::time::timeout;

fn draft(title: &str, start: i64, end: i64) -> EventDraft {
    EventDraft::new(title, start, end)
}

// ─── Persistence Across Instances ────────────────────────────────

#[tokio::test]
async fn test_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let (standup, lunch) = {
        let service = EventService::new(FileStore::open(&path).unwrap());
        let standup = service
            .insert(draft("Standup", 1_000, 2_000).with_location("Room 4"))
            .await
            .unwrap();
        let lunch = service
            .insert(draft("Lunch", 3_000, 4_000))
            .await
            .unwrap();
        (standup, lunch)
    };

    let service = EventService::new(FileStore::open(&path).unwrap());
    assert_eq!(service.store_name(), "file");
    assert_eq!(service.info().await.unwrap().events, 2);

    let fetched = service.get(standup).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Standup");
    assert_eq!(fetched.location.as_deref(), Some("Room 4"));
    assert!(service.get(lunch).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deletes_and_updates_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let id = {
        let service = EventService::new(FileStore::open(&path).unwrap());
        let keep = service.insert(draft("Keep", 100, 200)).await.unwrap();
        let gone = service.insert(draft("Gone", 300, 400)).await.unwrap();

        let mut event = service.get(keep).await.unwrap().unwrap();
        event.is_completed = true;
        service.update(event).await.unwrap();
        service.delete(gone).await.unwrap();
        keep
    };

    let service = EventService::new(FileStore::open(&path).unwrap());
    assert_eq!(service.info().await.unwrap().events, 1);
    assert!(service.get(id).await.unwrap().unwrap().is_completed);
}

#[tokio::test]
async fn test_id_sequence_resumes_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let last = {
        let service = EventService::new(FileStore::open(&path).unwrap());
        service.insert(draft("A", 10, 20)).await.unwrap();
        service.insert(draft("B", 30, 40)).await.unwrap()
    };

    let service = EventService::new(FileStore::open(&path).unwrap());
    let next = service.insert(draft("C", 50, 60)).await.unwrap();
    assert_eq!(next, last + 1);
}

// ─── Atomic Writes ───────────────────────────────────────────────

#[tokio::test]
async fn test_no_temp_file_lingers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let service = EventService::new(FileStore::open(&path).unwrap());
    for i in 0..10 {
        service
            .insert(draft(&format!("E{i}"), i * 100, i * 100 + 50))
            .await
            .unwrap();
    }

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_rejected_insert_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let service = EventService::new(FileStore::open(&path).unwrap());
    let result = service.insert(draft("", 10, 20)).await;
    assert!(matches!(result, Err(EventError::Validation(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_document_is_human_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let service = EventService::new(
        FileStore::with_config(FileConfig::new(&path)).unwrap(),
    );
    service
        .insert(draft("Dentist", 1_000, 2_000).with_note("bring card"))
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Dentist"));
    assert!(content.contains("bring card"));
    assert!(content.contains('\n'));
}

// ─── Live Feeds & Controller ─────────────────────────────────────

#[tokio::test]
async fn test_controller_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = EventService::new(
        FileStore::open(dir.path().join("events.json")).unwrap(),
    );
    let mut controller = EventController::new(service.clone()).await.unwrap();

    controller.insert(draft("Standup", 1_000, 2_000));
    let snapshot = timeout(Duration::from_secs(2), controller.schedule_changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.len(), 1);

    controller.select_day(0, 10_000).await.unwrap();
    assert_eq!(controller.day_events().len(), 1);

    controller.select_day(10_000, 20_000).await.unwrap();
    assert!(controller.day_events().is_empty());
}

#[tokio::test]
async fn test_range_feed_tracks_file_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let service = EventService::new(
        FileStore::open(dir.path().join("events.json")).unwrap(),
    );

    let mut feed = service.list_for_range(0, 1_000).await.unwrap();
    service.insert(draft("inside", 500, 600)).await.unwrap();

    let snapshot = timeout(Duration::from_secs(2), feed.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "inside");
}
