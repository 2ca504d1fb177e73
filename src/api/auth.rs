use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::api::middleware::{encode_token, ApiError, ApiResult, AppState, AUTH_COOKIE};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginEmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

fn auth_cookie(state: &AppState, value: String) -> Cookie<'static> {
    let same_site = if state.config.cookie_secure {
        SameSite::None
    } else {
        SameSite::Strict
    };

    Cookie::build((AUTH_COOKIE, value))
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(same_site)
        .path("/")
        .build()
}

/// Sign a JWT over the supplied principal and set it as an http-only cookie
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<TokenRequest>,
) -> ApiResult<impl IntoResponse> {
    if !EmailAddress::is_valid(&request.email) {
        return Err(ApiError::BadRequest(
            "email is not a valid address".to_string(),
        ));
    }

    let token = encode_token(
        &request.email,
        request.name,
        &state.config.jwt_secret,
        state.config.session_duration_hours,
    )?;

    let jar = jar.add(auth_cookie(&state, token));

    Ok((
        jar,
        Json(SuccessResponse {
            success: true,
            message: "Token issued".to_string(),
        }),
    ))
}

/// Clear the auth cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> ApiResult<impl IntoResponse> {
    let jar = jar.remove(auth_cookie(&state, String::new()));

    Ok((
        jar,
        Json(SuccessResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Send a login-notification email to the given address
pub async fn send_login_email(
    State(state): State<AppState>,
    Query(query): Query<LoginEmailQuery>,
) -> ApiResult<impl IntoResponse> {
    if !EmailAddress::is_valid(&query.email) {
        return Err(ApiError::BadRequest(
            "email is not a valid address".to_string(),
        ));
    }

    let mail_service = state
        .mail_service
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Email delivery is not configured".to_string()))?;

    mail_service
        .send_login_email(&query.email)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Email sent successfully".to_string(),
    }))
}
