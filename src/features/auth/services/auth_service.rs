use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Opaque bearer-token lookup against the users table.
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves the user owning `token`, or fails with Unauthorized.
    pub async fn find_by_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let user = sqlx::query_as::<_, AuthenticatedUser>(
            "SELECT id, username FROM users WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up token: {:?}", e);
            AppError::Database(e)
        })?;

        user.ok_or_else(|| AppError::Unauthorized("Invalid authorization token".to_string()))
    }
}
