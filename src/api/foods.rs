use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedUser},
    models::{FoodQuery, FoodUpdate},
};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct ListFoodsQuery {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Restrict to one owner's items
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub title: String,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub expiry_date: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
    pub food_id: String,
}

// API Handlers

/// List foods with optional title search and owner filter
pub async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<ListFoodsQuery>,
) -> ApiResult<impl IntoResponse> {
    let foods = state
        .food_service
        .list_foods(&FoodQuery {
            title_contains: query.search,
            owner_email: query.email,
        })
        .await?;

    Ok(Json(foods))
}

/// Soonest-expiring fresh items for the front page
pub async fn list_featured_foods(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let foods = state.food_service.front_page().await?;
    Ok(Json(foods))
}

pub async fn list_expired_foods(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let foods = state.food_service.list_expired().await?;
    Ok(Json(foods))
}

pub async fn list_expiring_soon_foods(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let foods = state.food_service.list_expiring_soon().await?;
    Ok(Json(foods))
}

pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let food = state.food_service.get_food(&id).await?;
    Ok(Json(food))
}

/// Add a food item to the authenticated user's fridge
pub async fn create_food(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateFoodRequest>,
) -> ApiResult<impl IntoResponse> {
    let food = state
        .food_service
        .create_food(
            &user.email,
            request.title,
            request.category,
            request.quantity,
            request.expiry_date,
            request.description,
            request.image_url,
        )
        .await?;

    Ok(Json(food))
}

pub async fn update_food(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(update): Json<FoodUpdate>,
) -> ApiResult<impl IntoResponse> {
    let food = state.food_service.update_food(&id, &user.email, update).await?;
    Ok(Json(food))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.food_service.delete_food(&id, &user.email).await?;

    Ok(Json(SuccessResponse {
        message: "Food deleted successfully".to_string(),
    }))
}

/// Flip the authenticated user's like on a food item
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.food_service.toggle_like(&id, &user.email).await?;

    Ok(Json(LikeResponse {
        liked: outcome.liked,
        likes_count: outcome.likes_count,
        food_id: id,
    }))
}
