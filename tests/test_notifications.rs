mod helpers;

use helpers::*;
use larder::api::middleware::ApiError;
use larder::models::{Notification, NotificationKind};

#[tokio::test]
async fn test_emit_persists_and_returns_id() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let id = service
        .emit(
            "alice@example.com",
            NotificationKind::FoodAdded,
            "You added \"Milk\" to your fridge".to_string(),
            Some("food-1".to_string()),
            Some("Milk".to_string()),
            Some("alice@example.com".to_string()),
        )
        .await
        .expect("emit should return an id");

    let stored = db.get_notification_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.owner_email, "alice@example.com");
    assert_eq!(stored.kind, NotificationKind::FoodAdded);
    assert!(!stored.read);
}

#[tokio::test]
async fn test_emit_swallows_store_failure() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    sqlx::query("DROP TABLE notifications")
        .execute(db.pool())
        .await
        .unwrap();

    let id = service
        .emit(
            "alice@example.com",
            NotificationKind::FoodAdded,
            "You added \"Milk\" to your fridge".to_string(),
            None,
            None,
            None,
        )
        .await;
    assert!(id.is_none());
}

#[tokio::test]
async fn test_primary_operation_survives_emit_failure() {
    let db = setup_test_db().await;
    let service = food_service(&db);

    sqlx::query("DROP TABLE notifications")
        .execute(db.pool())
        .await
        .unwrap();

    // Adding the food must still succeed without its side-effect notification
    let food = service
        .create_food(
            "alice@example.com",
            "Milk".to_string(),
            None,
            None,
            "2026-12-01T00:00:00+00:00".to_string(),
            None,
            None,
        )
        .await
        .expect("create_food should succeed");

    assert!(db.get_food_by_id(&food.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let mut first = Notification::new(
        "alice@example.com".to_string(),
        NotificationKind::FoodAdded,
        "first".to_string(),
        None,
        None,
        None,
    );
    first.created_at = "2026-01-01T10:00:00+00:00".to_string();
    db.create_notification(&first).await.unwrap();

    let mut second = Notification::new(
        "alice@example.com".to_string(),
        NotificationKind::FoodLiked,
        "second".to_string(),
        None,
        None,
        None,
    );
    second.created_at = "2026-01-02T10:00:00+00:00".to_string();
    db.create_notification(&second).await.unwrap();

    let listed = service.list("alice@example.com", 50, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].message, "second");
    assert_eq!(listed[1].message, "first");
}

#[tokio::test]
async fn test_unread_count_tracks_reads() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let id = service
        .emit(
            "alice@example.com",
            NotificationKind::ExpirySoon,
            "\"Milk\" expires tomorrow!".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();
    service
        .emit(
            "alice@example.com",
            NotificationKind::Expired,
            "\"Ham\" has expired! Consider discarding it.".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(service.unread_count("alice@example.com").await.unwrap(), 2);

    service.mark_read("alice@example.com", &id).await.unwrap();
    assert_eq!(service.unread_count("alice@example.com").await.unwrap(), 1);

    let stored = db.get_notification_by_id(&id).await.unwrap().unwrap();
    assert!(stored.read);
}

#[tokio::test]
async fn test_mark_read_distinguishes_not_found_and_forbidden() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let err = service
        .mark_read("alice@example.com", "no-such-id")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let id = service
        .emit(
            "alice@example.com",
            NotificationKind::FoodAdded,
            "hers".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let err = service.mark_read("bob@example.com", &id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // Untouched by the rejected attempt
    let stored = db.get_notification_by_id(&id).await.unwrap().unwrap();
    assert!(!stored.read);
}

#[tokio::test]
async fn test_mark_all_read_scoped_to_owner() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    for message in ["one", "two", "three"] {
        service
            .emit(
                "alice@example.com",
                NotificationKind::FoodAdded,
                message.to_string(),
                None,
                None,
                None,
            )
            .await
            .unwrap();
    }
    service
        .emit(
            "bob@example.com",
            NotificationKind::FoodAdded,
            "his".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let count = service.mark_all_read("alice@example.com").await.unwrap();
    assert_eq!(count, 3);
    assert_eq!(service.unread_count("alice@example.com").await.unwrap(), 0);

    // Another run affects nothing
    let count = service.mark_all_read("alice@example.com").await.unwrap();
    assert_eq!(count, 0);

    // Other users' feeds are untouched
    assert_eq!(service.unread_count("bob@example.com").await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_distinguishes_not_found_and_forbidden() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let err = service
        .delete("alice@example.com", "no-such-id")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let id = service
        .emit(
            "alice@example.com",
            NotificationKind::FoodAdded,
            "hers".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let err = service.delete("bob@example.com", &id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // The rejected delete leaves the store unchanged
    assert!(db.get_notification_by_id(&id).await.unwrap().is_some());

    service.delete("alice@example.com", &id).await.unwrap();
    assert!(db.get_notification_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_all_returns_count_and_scopes_to_owner() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    for message in ["one", "two"] {
        service
            .emit(
                "alice@example.com",
                NotificationKind::FoodAdded,
                message.to_string(),
                None,
                None,
                None,
            )
            .await
            .unwrap();
    }
    service
        .emit(
            "bob@example.com",
            NotificationKind::FoodAdded,
            "his".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let count = service.delete_all("alice@example.com").await.unwrap();
    assert_eq!(count, 2);
    assert!(service
        .list("alice@example.com", 50, 0)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(service.list("bob@example.com", 50, 0).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_seed_samples_populates_feed() {
    let db = setup_test_db().await;
    let service = notification_service(&db);

    let count = service.seed_samples("alice@example.com").await.unwrap();
    assert_eq!(count, 3);
    assert_eq!(service.unread_count("alice@example.com").await.unwrap(), 3);
}
