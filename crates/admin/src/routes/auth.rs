//! Authentication route handlers.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash::rand_core::OsRng};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use orderdeck_core::model::User;
use orderdeck_core::types::{Email, UserRole};

use crate::{
    db::UserRepository,
    error::AppError,
    middleware::RequireAdmin,
    models::{CurrentAdmin, session_keys},
    state::AppState,
};

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Login form input.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Registration input.
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Hash a password with argon2.
pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Password login handler. Establishes the session on success.
#[instrument(skip(state, session, input))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let email = Email::parse(&input.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let credentials = UserRepository::new(state.pool())
        .get_credentials_by_email(&email)
        .await?;

    // A missing user and a wrong password produce the same response.
    let Some(credentials) = credentials else {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    };
    if !verify_password(&input.password, &credentials.password_hash) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let admin = CurrentAdmin::from(&credentials.user);

    // Fresh session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    session
        .insert(session_keys::CURRENT_ADMIN, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %admin.id, "Admin logged in");
    Ok(Json(admin))
}

/// Logout handler. Destroys the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current-user handler.
#[instrument(skip(admin))]
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<CurrentAdmin> {
    Json(admin)
}

/// Create a new admin user. Requires an authenticated session.
#[instrument(skip(admin, state, input))]
pub async fn register(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    let email = Email::parse(&input.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    let role: UserRole = input.role.parse().map_err(AppError::BadRequest)?;
    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password_hash = hash_password(&input.password)?;
    let user = UserRepository::new(state.pool())
        .insert(input.name.trim(), &email, role, &password_hash)
        .await?;

    tracing::info!(created_by = %admin.id, user_id = %user.id, "Admin user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery staple").expect("hashing works");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
