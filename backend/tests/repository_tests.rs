//! Tests for the generic repository and unit of work over the local store.

mod support;

use support::{repository, seed};
use villa_api::db::{LocalStore, Tracking, VillaFilter};
use villa_api::models::VillaId;

#[tokio::test]
async fn test_repositories_do_not_share_tracking() {
    let store = LocalStore::new();
    let id = seed(&store, "Shared");

    let mut first = repository(&store);
    let second = repository(&store);
    first
        .get(&VillaFilter::by_id(id), Tracking::Tracked)
        .await
        .unwrap();

    assert!(first.is_tracked(id));
    assert!(!second.is_tracked(id));
}

#[tokio::test]
async fn test_tracked_edit_is_invisible_until_save() {
    let store = LocalStore::new();
    let id = seed(&store, "Pending");
    let mut repo = repository(&store);

    repo.get(&VillaFilter::by_id(id), Tracking::Tracked)
        .await
        .unwrap();
    repo.tracked_mut(id).unwrap().occupancy = 12;

    let other = repository(&store).get_all().await.unwrap();
    assert_eq!(other[0].occupancy, 4);

    assert_eq!(repo.save().await.unwrap(), 1);
    assert_eq!(store.villa(id).unwrap().occupancy, 12);
}

#[tokio::test]
async fn test_create_flushes_earlier_tracked_edits() {
    let store = LocalStore::new();
    let id = seed(&store, "Earlier");
    let mut repo = repository(&store);

    repo.get(&VillaFilter::by_name("Earlier"), Tracking::Tracked)
        .await
        .unwrap();
    repo.tracked_mut(id).unwrap().amenity = "Sauna".to_string();

    repo.create(villa_api::models::NewVilla::from(support::create_dto("Later")))
        .await
        .unwrap();

    assert_eq!(store.villa(id).unwrap().amenity, "Sauna");
    assert_eq!(repo.tracked_count(), 2);
}

#[tokio::test]
async fn test_untracked_read_leaves_unit_of_work_empty() {
    let store = LocalStore::new();
    let id = seed(&store, "Snapshot");
    let mut repo = repository(&store);

    let snapshot = repo
        .get(&VillaFilter::by_id(id), Tracking::Untracked)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(snapshot.id, id);
    assert_eq!(repo.tracked_count(), 0);
    assert!(repo.tracked_mut(id).is_none());
}

#[tokio::test]
async fn test_remove_missing_entity_is_not_found() {
    let store = LocalStore::new();
    let id = seed(&store, "Fleeting");
    let mut repo = repository(&store);
    let villa = repo
        .get(&VillaFilter::by_id(id), Tracking::Tracked)
        .await
        .unwrap()
        .unwrap();

    store.clear();
    let err = repo.remove(&villa).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_all_propagates_connection_error() {
    let store = LocalStore::new();
    store.set_healthy(false);

    let err = repository(&store).get_all().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(!repository(&store).health_check().await.unwrap());
}

#[tokio::test]
async fn test_ids_keep_increasing_after_delete() {
    let store = LocalStore::new();
    let mut repo = repository(&store);
    let first = repo
        .create(villa_api::models::NewVilla::from(support::create_dto("One")))
        .await
        .unwrap();
    repo.remove(&first).await.unwrap();

    let second = repo
        .create(villa_api::models::NewVilla::from(support::create_dto("Two")))
        .await
        .unwrap();
    assert_eq!(first.id, VillaId::new(1));
    assert_eq!(second.id, VillaId::new(2));
}
