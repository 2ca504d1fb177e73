use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api::middleware::error::ApiError;
use crate::config::Config;
use crate::services::{ChatService, FoodService, MailService, NotificationService, ReviewService};

/// Name of the http-only cookie carrying the access token
pub const AUTH_COOKIE: &str = "token";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub food_service: FoodService,
    pub review_service: ReviewService,
    pub notification_service: NotificationService,
    pub mail_service: Option<MailService>,
    pub chat_service: Option<ChatService>,
}

/// JWT claims payload embedded in every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's email
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// The acting principal, resolved from a verified token. This is the only
/// authoritative identity source; identity fields in request bodies are
/// ignored.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: Option<String>,
}

pub fn encode_token(
    email: &str,
    name: Option<String>,
    secret: &str,
    duration_hours: i64,
) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: email.to_string(),
        name,
        iat: now,
        exp: now + duration_hours * 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 5; // 5 seconds leeway for clock skew

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Resolve the access-token cookie into the acting principal
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = decode_token(&token, &state.config.jwt_secret)?;

    request.extensions_mut().insert(AuthenticatedUser {
        email: claims.sub,
        name: claims.name,
    });

    Ok(next.run(request).await)
}
