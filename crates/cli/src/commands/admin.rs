//! Admin user creation command.

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, password_hash::rand_core::OsRng};

use orderdeck_admin::db::UserRepository;
use orderdeck_core::types::{Email, UserRole};

use super::{CommandError, connect};

/// Create an admin user with a hashed password.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let role: UserRole = role.parse().map_err(CommandError::Invalid)?;
    if password.len() < 8 {
        return Err(CommandError::Invalid(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::Invalid(format!("password hashing failed: {e}")))?
        .to_string();

    let pool = connect().await?;
    let user = UserRepository::new(&pool)
        .insert(name, &email, role, &password_hash)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "Admin user created");
    Ok(())
}
