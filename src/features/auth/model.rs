use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::error::AppError;

/// The user resolved from the `Authorization` header, carried through request
/// extensions to handlers and audit rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

/// Handlers take `user: AuthenticatedUser` directly; the value is the one the
/// token middleware stored in request extensions. Absence means the route was
/// mounted outside the guarded group.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
