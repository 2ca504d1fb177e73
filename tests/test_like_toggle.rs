mod helpers;

use helpers::*;
use larder::api::middleware::ApiError;
use larder::models::NotificationKind;

#[tokio::test]
async fn test_toggle_twice_returns_to_unliked() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let service = food_service(&db);

    let outcome = service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    assert!(outcome.liked);
    assert_eq!(outcome.likes_count, 1);

    let outcome = service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    assert!(!outcome.liked);
    assert_eq!(outcome.likes_count, 0);
}

#[tokio::test]
async fn test_non_owner_like_notifies_owner_once() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let service = food_service(&db);

    service.toggle_like(&food.id, "bob@example.com").await.unwrap();

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::FoodLiked);
    assert_eq!(
        notifications[0].related_user.as_deref(),
        Some("bob@example.com")
    );

    // The liker gets nothing
    let bob = db
        .list_notifications("bob@example.com", 50, 0)
        .await
        .unwrap();
    assert!(bob.is_empty());
}

#[tokio::test]
async fn test_owner_self_like_emits_no_notification() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let service = food_service(&db);

    let outcome = service.toggle_like(&food.id, "alice@example.com").await.unwrap();
    assert!(outcome.liked);
    assert_eq!(outcome.likes_count, 1);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn test_each_toggle_to_liked_notifies_again() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let service = food_service(&db);

    service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    service.toggle_like(&food.id, "bob@example.com").await.unwrap();

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| n.kind == NotificationKind::FoodLiked));
}

#[tokio::test]
async fn test_unlike_emits_no_notification() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let service = food_service(&db);

    service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    service.toggle_like(&food.id, "bob@example.com").await.unwrap();

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn test_like_counts_are_per_item_across_users() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let other = create_test_food(&db, "alice@example.com", "Eggs", 48).await;
    let service = food_service(&db);

    service.toggle_like(&food.id, "bob@example.com").await.unwrap();
    let outcome = service.toggle_like(&food.id, "carol@example.com").await.unwrap();
    assert_eq!(outcome.likes_count, 2);

    let outcome = service.toggle_like(&other.id, "bob@example.com").await.unwrap();
    assert_eq!(outcome.likes_count, 1);

    let stored = db.get_food_by_id(&food.id).await.unwrap().unwrap();
    assert_eq!(stored.likes_count(), 2);
    assert!(stored.is_liked_by("bob@example.com"));
    assert!(stored.is_liked_by("carol@example.com"));
}

#[tokio::test]
async fn test_unknown_food_is_not_found() {
    let db = setup_test_db().await;
    let service = food_service(&db);

    let err = service
        .toggle_like("no-such-id", "bob@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
