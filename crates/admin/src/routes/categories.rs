//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdeck_core::model::Category;
use orderdeck_core::types::CategoryId;

use crate::{
    db::CategoryRepository,
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// Category listing response.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// All categories by name.
    pub categories: Vec<Category>,
}

/// Input carrying a category name.
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    fn name(&self) -> Result<&str, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        Ok(name)
    }
}

/// Category listing handler.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Category detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, AppError> {
    CategoryRepository::new(state.pool())
        .get_by_id(CategoryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))
}

/// Category creation handler.
#[instrument(skip(_admin, state, input))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryRepository::new(state.pool())
        .insert(input.name()?)
        .await?;
    tracing::info!(category_id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Category rename handler.
#[instrument(skip(_admin, state, input))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), input.name()?)
        .await?;
    tracing::info!(category_id = %category.id, "Category renamed");
    Ok(Json(category))
}

/// Category deletion handler.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;
    if removed {
        tracing::info!(category_id = %id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id}")))
    }
}
