//! First-run administrator account.
//!
//! When `ADMIN_EMAIL` and `ADMIN_PASSWORD` are both set and no active
//! `ADMIN` user exists, one is created at startup. Otherwise nothing happens.

use parish_core::error::CoreError;
use parish_core::roles::Role;
use parish_db::models::user::{CreateUser, User};
use parish_db::repositories::UserRepo;
use parish_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::AppError;

/// Credentials for the seeded administrator.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// Read `ADMIN_EMAIL` / `ADMIN_PASSWORD`. `None` unless both are non-empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok()?;
        let password = std::env::var("ADMIN_PASSWORD").ok()?;
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            email: email.trim().to_lowercase(),
            password,
        })
    }
}

/// Create the administrator if the system has none. Returns the new user,
/// or `None` when an active admin already exists.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> Result<Option<User>, AppError> {
    if UserRepo::count_active_with_role(pool, Role::Admin).await? > 0 {
        return Ok(None);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: seed.email.clone(),
            password_hash,
            role: Role::Admin,
            member_id: None,
        },
    )
    .await?;

    Ok(Some(user))
}
