use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stores::dtos::{CreateStoreDto, StoreResponseDto, UpdateStoreDto};
use crate::features::stores::services::StoreService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Create a new store under a branch
#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStoreDto,
    responses(
        (status = 201, description = "Store created", body = ApiResponse<StoreResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced branch not found")
    ),
    tag = "stores"
)]
pub async fn create_store(
    State(service): State<Arc<StoreService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateStoreDto>,
) -> Result<(StatusCode, Json<ApiResponse<StoreResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Store created successfully",
            Some(created),
        )),
    ))
}

/// List active stores with pagination
#[utoipa::path(
    get,
    path = "/api/stores",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of stores", body = ApiResponse<Vec<StoreResponseDto>>),
    ),
    tag = "stores"
)]
pub async fn list_stores(
    State(service): State<Arc<StoreService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<StoreResponseDto>>>> {
    let stores = service.all(query.page, query.size).await?;
    Ok(Json(ApiResponse::success(
        "Stores fetched successfully",
        Some(stores),
    )))
}

/// Get a store by id
#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    params(("id" = i64, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store found", body = ApiResponse<StoreResponseDto>),
        (status = 404, description = "Store not found")
    ),
    tag = "stores"
)]
pub async fn get_store(
    State(service): State<Arc<StoreService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<StoreResponseDto>>> {
    let store = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Store fetched successfully",
        Some(store),
    )))
}

/// Update a store
#[utoipa::path(
    put,
    path = "/api/stores/{id}",
    params(("id" = i64, Path, description = "Store id")),
    request_body = UpdateStoreDto,
    responses(
        (status = 200, description = "Store updated", body = ApiResponse<StoreResponseDto>),
        (status = 404, description = "Store or referenced branch not found")
    ),
    tag = "stores"
)]
pub async fn update_store(
    State(service): State<Arc<StoreService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<UpdateStoreDto>,
) -> Result<Json<ApiResponse<StoreResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(
        "Store updated successfully",
        Some(updated),
    )))
}

/// Soft-delete a store
#[utoipa::path(
    delete,
    path = "/api/stores/{id}",
    params(("id" = i64, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store deleted"),
        (status = 404, description = "Store not found")
    ),
    tag = "stores"
)]
pub async fn delete_store(
    State(service): State<Arc<StoreService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        "Store deleted successfully",
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stores::routes;
    use crate::shared::test_helpers::{lazy_test_pool, with_test_user};
    use axum_test::TestServer;

    fn test_server() -> TestServer {
        let service = Arc::new(StoreService::new(lazy_test_pool()));
        TestServer::new(with_test_user(routes::routes(service))).unwrap()
    }

    #[tokio::test]
    async fn create_without_branch_reference_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/stores")
            .json(&serde_json::json!({"name": "Store A", "address": "Jl. X"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Branch must be provided"));
    }

    #[tokio::test]
    async fn create_with_blank_address_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/stores")
            .json(&serde_json::json!({
                "name": "Store A",
                "address": "  ",
                "branch": {"id": 1}
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
