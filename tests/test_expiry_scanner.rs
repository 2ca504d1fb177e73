mod helpers;

use chrono::{DateTime, Utc};
use helpers::*;
use larder::models::NotificationKind;

#[tokio::test]
async fn test_expiring_food_notified_exactly_once() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Milk", 48).await;
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 1);
    assert_eq!(summary.expired, 0);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::ExpirySoon);
    assert_eq!(notifications[0].food_id.as_deref(), Some(food.id.as_str()));
    assert_eq!(notifications[0].food_title.as_deref(), Some("Milk"));

    let stored = db.get_food_by_id(&food.id).await.unwrap().unwrap();
    assert!(stored.expiry_notification_sent);
    assert!(!stored.expired_notification_sent);

    // A second pass over unchanged state must not re-emit
    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 0);
    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn test_food_expiring_tomorrow_message() {
    let db = setup_test_db().await;
    create_test_food(&db, "alice@example.com", "Yogurt", 24).await;
    let scanner = expiry_scanner(&db, 3);

    scanner.scan_now().await.unwrap();

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::ExpirySoon);
    assert!(notifications[0].message.contains("expires tomorrow"));
}

#[tokio::test]
async fn test_food_expiring_at_scan_instant_is_today() {
    let db = setup_test_db().await;
    let now: DateTime<Utc> = DateTime::parse_from_rfc3339("2026-03-01T09:00:00+00:00")
        .unwrap()
        .with_timezone(&Utc);
    create_test_food_at(&db, "alice@example.com", "Bread", "2026-03-01T09:00:00+00:00").await;
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_at(now).await.unwrap();
    assert_eq!(summary.expiring, 1);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications[0].kind, NotificationKind::ExpiryToday);
    assert!(notifications[0].message.contains("expires today"));
}

#[tokio::test]
async fn test_expired_food_notified_exactly_once() {
    let db = setup_test_db().await;
    let food = create_test_food(&db, "alice@example.com", "Ham", -24).await;
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 0);
    assert_eq!(summary.expired, 1);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Expired);
    assert!(notifications[0].message.contains("has expired"));

    let stored = db.get_food_by_id(&food.id).await.unwrap().unwrap();
    assert!(stored.expired_notification_sent);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expired, 0);
    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn test_fresh_food_outside_window_is_ignored() {
    let db = setup_test_db().await;
    create_test_food(&db, "alice@example.com", "Canned Beans", 24 * 10).await;
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 0);
    assert_eq!(summary.expired, 0);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn test_already_flagged_items_are_skipped() {
    let db = setup_test_db().await;
    let expiring = create_test_food(&db, "alice@example.com", "Milk", 24).await;
    let expired = create_test_food(&db, "alice@example.com", "Ham", -24).await;
    db.mark_expiry_notified(&expiring.id).await.unwrap();
    db.mark_expired_notified(&expired.id).await.unwrap();
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 0);
    assert_eq!(summary.expired, 0);

    let notifications = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn test_scan_covers_multiple_owners() {
    let db = setup_test_db().await;
    create_test_food(&db, "alice@example.com", "Milk", 24).await;
    create_test_food(&db, "bob@example.com", "Cheese", 48).await;
    create_test_food(&db, "bob@example.com", "Old Ham", -48).await;
    let scanner = expiry_scanner(&db, 3);

    let summary = scanner.scan_now().await.unwrap();
    assert_eq!(summary.expiring, 2);
    assert_eq!(summary.expired, 1);

    let alice = db
        .list_notifications("alice@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(alice.len(), 1);

    let bob = db
        .list_notifications("bob@example.com", 50, 0)
        .await
        .unwrap();
    assert_eq!(bob.len(), 2);
}

#[tokio::test]
async fn test_lookahead_window_is_configurable() {
    let db = setup_test_db().await;
    create_test_food(&db, "alice@example.com", "Butter", 24 * 4).await;

    // Outside a 3-day window
    let summary = expiry_scanner(&db, 3).scan_now().await.unwrap();
    assert_eq!(summary.expiring, 0);

    // Inside a 5-day window
    let summary = expiry_scanner(&db, 5).scan_now().await.unwrap();
    assert_eq!(summary.expiring, 1);
}
