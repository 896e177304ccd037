use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor that reports parse failures through the standard error
/// envelope instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let detail = match rejection {
                    JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e),
                    JsonRejection::JsonSyntaxError(e) => format!("Invalid JSON syntax: {}", e),
                    JsonRejection::MissingJsonContentType(e) => {
                        format!("Missing JSON content type: {}", e)
                    }
                    other => format!("Failed to read JSON body: {}", other),
                };
                AppError::BadRequest(detail)
            })?;

        Ok(Self(value))
    }
}
