use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::{require_auth, AppState};
use crate::api::{auth, chat, foods, notifications, reviews};
use crate::config::Config;

pub fn build_router(state: AppState) -> Router {
    // Owner-scoped routes: the acting principal comes from the verified
    // token cookie
    let protected = Router::new()
        .route("/api/foods", post(foods::create_food))
        .route("/api/foods/:id", put(foods::update_food))
        .route("/api/foods/:id", delete(foods::delete_food))
        .route("/api/foods/:id/like", patch(foods::toggle_like))
        .route("/api/reviews", post(reviews::create_review))
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications",
            delete(notifications::delete_all_notifications),
        )
        .route(
            "/api/notifications/count",
            get(notifications::get_unread_count),
        )
        .route(
            "/api/notifications/read-all",
            put(notifications::mark_all_notifications_read),
        )
        .route(
            "/api/notifications/:id/read",
            put(notifications::mark_notification_read),
        )
        .route(
            "/api/notifications/:id",
            delete(notifications::delete_notification),
        )
        .route(
            "/api/notifications/seed",
            post(notifications::seed_notifications),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/auth/token", post(auth::issue_token))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/login-email", get(auth::send_login_email))
        .route("/api/chat", post(chat::chat))
        .route("/api/foods", get(foods::list_foods))
        .route("/api/foods/featured", get(foods::list_featured_foods))
        .route("/api/foods/expired", get(foods::list_expired_foods))
        .route(
            "/api/foods/expiring-soon",
            get(foods::list_expiring_soon_foods),
        )
        .route("/api/foods/:id", get(foods::get_food))
        .route("/api/reviews", get(reviews::list_reviews))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root_handler() -> &'static str {
    "Larder food tracker is running"
}

async fn health_handler() -> &'static str {
    "OK"
}
