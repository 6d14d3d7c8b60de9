//! User management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdeck_core::model::User;
use orderdeck_core::types::{Email, UserId, UserRole};

use crate::{
    db::UserRepository,
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// User listing response.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    /// All users, newest first.
    pub users: Vec<User>,
}

/// Input for updating a user.
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// User listing handler.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, AppError> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(UsersResponse { users }))
}

/// User update handler.
#[instrument(skip(admin, state, input))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<User>, AppError> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    let email = input
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    let role = input
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let user = UserRepository::new(state.pool())
        .update(
            UserId::new(id),
            input.name.as_deref().map(str::trim),
            email.as_ref(),
            role,
        )
        .await?;
    tracing::info!(updated_by = %admin.id, user_id = %user.id, "User updated");
    Ok(Json(user))
}

/// User deletion handler.
///
/// An admin cannot delete their own account out from under their session.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let target = UserId::new(id);
    if target == admin.id {
        return Err(AppError::Conflict(
            "cannot delete the logged-in user".to_string(),
        ));
    }

    let removed = UserRepository::new(state.pool()).delete(target).await?;
    if removed {
        tracing::info!(deleted_by = %admin.id, user_id = %id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("user {id}")))
    }
}
