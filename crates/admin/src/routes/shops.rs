//! Shop route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdeck_core::model::Shop;
use orderdeck_core::types::ShopId;

use crate::{
    db::ShopRepository,
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// Shop listing response.
#[derive(Debug, Serialize)]
pub struct ShopsResponse {
    /// All shops by name.
    pub shops: Vec<Shop>,
}

/// Input for creating a shop.
#[derive(Debug, Deserialize)]
pub struct CreateShopInput {
    pub name: String,
    pub address: Option<String>,
}

/// Input for updating a shop.
#[derive(Debug, Deserialize)]
pub struct UpdateShopInput {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Shop listing handler.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ShopsResponse>, AppError> {
    let shops = ShopRepository::new(state.pool()).list_all().await?;
    Ok(Json(ShopsResponse { shops }))
}

/// Shop creation handler.
#[instrument(skip(_admin, state, input))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateShopInput>,
) -> Result<(StatusCode, Json<Shop>), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let shop = ShopRepository::new(state.pool())
        .insert(name, input.address.as_deref())
        .await?;
    tracing::info!(shop_id = %shop.id, "Shop created");
    Ok((StatusCode::CREATED, Json(shop)))
}

/// Shop update handler.
#[instrument(skip(_admin, state, input))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateShopInput>,
) -> Result<Json<Shop>, AppError> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let shop = ShopRepository::new(state.pool())
        .update(
            ShopId::new(id),
            input.name.as_deref().map(str::trim),
            input.address.as_deref(),
        )
        .await?;
    tracing::info!(shop_id = %shop.id, "Shop updated");
    Ok(Json(shop))
}

/// Shop deletion handler.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = ShopRepository::new(state.pool())
        .delete(ShopId::new(id))
        .await?;
    if removed {
        tracing::info!(shop_id = %id, "Shop deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("shop {id}")))
    }
}
