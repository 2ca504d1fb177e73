use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::middleware::{ApiResult, AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub food_title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    pub food_title: Option<String>,
}

/// Attach a review to one of the authenticated user's own food items
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let review = state
        .review_service
        .create_review(&user.email, &request.food_title, &request.content)
        .await?;

    Ok(Json(review))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> ApiResult<impl IntoResponse> {
    let reviews = state
        .review_service
        .list_reviews(query.food_title.as_deref())
        .await?;

    Ok(Json(reviews))
}
