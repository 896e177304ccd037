use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stores::dtos::StoreResponseDto;
use crate::features::whitelist_stores::dtos::{
    CreateWhitelistStoreDto, UpdateWhitelistStoreDto, WhitelistStoreResponseDto,
};
use crate::features::whitelist_stores::services::WhitelistStoreService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Whitelist an existing store
#[utoipa::path(
    post,
    path = "/api/whitelist-stores",
    request_body = CreateWhitelistStoreDto,
    responses(
        (status = 200, description = "Store whitelisted", body = ApiResponse<WhitelistStoreResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced store not found"),
        (status = 409, description = "Store is already whitelisted")
    ),
    tag = "whitelist-stores"
)]
pub async fn create_whitelist_store(
    State(service): State<Arc<WhitelistStoreService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateWhitelistStoreDto>,
) -> Result<Json<ApiResponse<WhitelistStoreResponseDto>>> {
    let created = service.create(dto, &user).await?;
    Ok(Json(ApiResponse::success(
        "Store whitelisted successfully",
        Some(created),
    )))
}

/// List the whitelisted stores with pagination
#[utoipa::path(
    get,
    path = "/api/whitelist-stores",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of whitelisted stores", body = ApiResponse<Vec<StoreResponseDto>>),
    ),
    tag = "whitelist-stores"
)]
pub async fn list_whitelist_stores(
    State(service): State<Arc<WhitelistStoreService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<StoreResponseDto>>>> {
    let stores = service.all(query.page, query.size).await?;
    Ok(Json(ApiResponse::success(
        "Whitelist stores fetched successfully",
        Some(stores),
    )))
}

/// Get a whitelist entry by id
#[utoipa::path(
    get,
    path = "/api/whitelist-stores/{id}",
    params(("id" = i64, Path, description = "Whitelist entry id")),
    responses(
        (status = 200, description = "Whitelist entry found", body = ApiResponse<WhitelistStoreResponseDto>),
        (status = 404, description = "Whitelist store not found")
    ),
    tag = "whitelist-stores"
)]
pub async fn get_whitelist_store(
    State(service): State<Arc<WhitelistStoreService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<WhitelistStoreResponseDto>>> {
    let entry = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Whitelist store fetched successfully",
        Some(entry),
    )))
}

/// Retarget a whitelist entry to another store
#[utoipa::path(
    put,
    path = "/api/whitelist-stores/{id}",
    params(("id" = i64, Path, description = "Whitelist entry id")),
    request_body = UpdateWhitelistStoreDto,
    responses(
        (status = 200, description = "Whitelist entry updated", body = ApiResponse<WhitelistStoreResponseDto>),
        (status = 404, description = "Whitelist entry or referenced store not found"),
        (status = 409, description = "Store is already whitelisted")
    ),
    tag = "whitelist-stores"
)]
pub async fn update_whitelist_store(
    State(service): State<Arc<WhitelistStoreService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<UpdateWhitelistStoreDto>,
) -> Result<Json<ApiResponse<WhitelistStoreResponseDto>>> {
    let updated = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(
        "Whitelist store updated successfully",
        Some(updated),
    )))
}

/// Delete a whitelist entry
#[utoipa::path(
    delete,
    path = "/api/whitelist-stores/{id}",
    params(("id" = i64, Path, description = "Whitelist entry id")),
    responses(
        (status = 200, description = "Whitelist entry deleted"),
    ),
    tag = "whitelist-stores"
)]
pub async fn delete_whitelist_store(
    State(service): State<Arc<WhitelistStoreService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        "Whitelist store deleted successfully",
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::whitelist_stores::routes;
    use crate::shared::test_helpers::{lazy_test_pool, with_test_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn test_server() -> TestServer {
        let service = Arc::new(WhitelistStoreService::new(lazy_test_pool()));
        TestServer::new(with_test_user(routes::routes(service))).unwrap()
    }

    #[tokio::test]
    async fn create_without_store_reference_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/whitelist-stores")
            .json(&serde_json::json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Store must be provided"));
    }

    #[tokio::test]
    async fn update_with_empty_store_reference_is_rejected() {
        let server = test_server();
        let response = server
            .put("/api/whitelist-stores/1")
            .json(&serde_json::json!({"store": {}}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Store must be provided"));
    }
}
