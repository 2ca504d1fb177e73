use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};

use crate::{
    api::middleware::error::ApiResult,
    database::Database,
    models::{expired_message, expiry_message, NotificationKind},
    services::NotificationService,
};

/// Counts of items handled by one scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub expiring: usize,
    pub expired: usize,
}

/// Scans food items for expiry-state transitions and emits the matching
/// notification once per transition.
///
/// Idempotence rests on the two per-item flags alone: items already flagged
/// are never picked up again, so re-running a scan over unchanged state emits
/// nothing. The notification write and the flag write are two independent
/// store writes; a failure between them loses at most that one notification.
#[derive(Clone)]
pub struct ExpiryScanner {
    db: Database,
    notifications: NotificationService,
    lookahead_days: i64,
}

impl ExpiryScanner {
    pub fn new(db: Database, notifications: NotificationService, lookahead_days: i64) -> Self {
        Self {
            db,
            notifications,
            lookahead_days,
        }
    }

    pub async fn scan_now(&self) -> ApiResult<ScanSummary> {
        self.scan_at(Utc::now()).await
    }

    /// One scan pass with an explicit current instant
    pub async fn scan_at(&self, now: DateTime<Utc>) -> ApiResult<ScanSummary> {
        let now_str = now.to_rfc3339();
        let until_str = (now + Duration::days(self.lookahead_days)).to_rfc3339();

        let expiring = self.db.find_expiring_unnotified(&now_str, &until_str).await?;
        for food in &expiring {
            let days = match days_until_expiry(now, &food.expiry_date) {
                Ok(days) => days,
                Err(e) => {
                    warn!("Skipping food {} with unparseable expiry: {}", food.id, e);
                    continue;
                }
            };

            let (kind, message) = expiry_message(&food.title, days);
            self.notifications
                .emit(
                    &food.owner_email,
                    kind,
                    message,
                    Some(food.id.clone()),
                    Some(food.title.clone()),
                    Some(food.owner_email.clone()),
                )
                .await;

            self.db.mark_expiry_notified(&food.id).await?;
        }

        let expired = self.db.find_expired_unnotified(&now_str).await?;
        for food in &expired {
            self.notifications
                .emit(
                    &food.owner_email,
                    NotificationKind::Expired,
                    expired_message(&food.title),
                    Some(food.id.clone()),
                    Some(food.title.clone()),
                    Some(food.owner_email.clone()),
                )
                .await;

            self.db.mark_expired_notified(&food.id).await?;
        }

        Ok(ScanSummary {
            expiring: expiring.len(),
            expired: expired.len(),
        })
    }

    /// Scan once at startup, then on a fixed interval. Single-scanner
    /// deployment assumed; there is no overlap protection.
    pub async fn run(self, interval: std::time::Duration) {
        info!("Starting expiry scanner (interval {:?})", interval);
        loop {
            match self.scan_now().await {
                Ok(summary) if summary.expiring + summary.expired > 0 => {
                    info!(
                        "Created notifications for {} expiring and {} expired foods",
                        summary.expiring, summary.expired
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Expiry scan failed: {}", e);
                }
            }

            tokio::time::sleep(interval).await;
        }
    }
}

/// Whole days from `now` until `expiry`, rounded up; zero for an expiry
/// within the current day
fn days_until_expiry(now: DateTime<Utc>, expiry: &str) -> Result<i64, chrono::ParseError> {
    let expiry = DateTime::parse_from_rfc3339(expiry)?.with_timezone(&Utc);
    let seconds = (expiry - now).num_seconds();
    if seconds <= 0 {
        return Ok(0);
    }
    Ok((seconds + 86_399) / 86_400)
}
