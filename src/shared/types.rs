use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Uniform JSON envelope for every endpoint.
///
/// Success responses carry `message` and `data`; failure responses carry
/// `message` and `error`. Absent fields are omitted from the payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            message: message.into(),
            data,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> ApiResponse<()> {
        ApiResponse {
            message: message.into(),
            data: None,
            error,
        }
    }
}

/// Reference to another entity by id, as nested in request bodies
/// (e.g. `{"province": {"id": 1}}`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityRef {
    pub id: Option<i64>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for all list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page index (zero-based, default: 0)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page (default: 50)
    #[serde(default = "default_page_size")]
    pub size: usize,
}

pub fn default_page() -> usize {
    DEFAULT_PAGE
}

pub fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let body = serde_json::to_value(ApiResponse::success(
            "Provinces fetched successfully",
            Some(vec![1, 2, 3]),
        ))
        .unwrap();
        assert_eq!(body["message"], "Provinces fetched successfully");
        assert_eq!(body["data"], serde_json::json!([1, 2, 3]));
        assert!(body.get("error").is_none());
    }

    #[test]
    fn failure_envelope_omits_data_field() {
        let body = serde_json::to_value(ApiResponse::<()>::failure(
            "Validation failed",
            Some("Name must not be blank".to_string()),
        ))
        .unwrap();
        assert_eq!(body["error"], "Name must not be blank");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn pagination_defaults_to_first_page_of_fifty() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 50);
    }

    #[test]
    fn entity_ref_deserializes_from_nested_body() {
        let entity: EntityRef = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(entity.id, Some(7));
        let empty: EntityRef = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.id, None);
    }
}
