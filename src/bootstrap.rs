use std::time::Duration;

use crate::api::middleware::AppState;
use crate::config::Config;
use crate::database::Database;
use crate::services::{
    ChatService, ExpiryScanner, FoodService, MailService, NotificationService, ReviewService,
    SmtpConfig,
};

/// Wire up services against the store and start the background scanner
pub async fn build_app_state(
    db: Database,
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let notification_service = NotificationService::new(db.clone());
    let food_service = FoodService::new(db.clone(), notification_service.clone());
    let review_service = ReviewService::new(db.clone(), notification_service.clone());

    let mail_service = match SmtpConfig::from_env() {
        Ok(smtp) => Some(MailService::new(smtp)?),
        Err(e) => {
            tracing::info!("Email delivery disabled: {}", e);
            None
        }
    };

    let chat_service = config.chat_api_key.as_ref().map(|key| {
        ChatService::new(
            key.clone(),
            config.chat_api_base.clone(),
            config.chat_model.clone(),
        )
    });
    if chat_service.is_none() {
        tracing::info!("Assistant disabled: OPENAI_API_KEY not set");
    }

    let scanner = ExpiryScanner::new(
        db,
        notification_service.clone(),
        config.expiry_lookahead_days,
    );
    tokio::spawn(scanner.run(Duration::from_secs(config.expiry_scan_interval_secs)));
    tracing::info!("Expiry scanner started");

    Ok(AppState {
        config: config.clone(),
        food_service,
        review_service,
        notification_service,
        mail_service,
        chat_service,
    })
}
