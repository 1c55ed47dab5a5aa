//! Error type for repository operations that apply domain rules.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Methods that load rows,
//! check a [`parish_core`] rule and then write (inside one transaction)
//! return [`RepoError`] so the caller can tell a rule violation from a
//! database failure.

use parish_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
