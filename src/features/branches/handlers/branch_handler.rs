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
use crate::features::branches::dtos::{BranchResponseDto, CreateBranchDto, UpdateBranchDto};
use crate::features::branches::services::BranchService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Create a new branch under a province
#[utoipa::path(
    post,
    path = "/api/branches",
    request_body = CreateBranchDto,
    responses(
        (status = 201, description = "Branch created", body = ApiResponse<BranchResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced province not found")
    ),
    tag = "branches"
)]
pub async fn create_branch(
    State(service): State<Arc<BranchService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateBranchDto>,
) -> Result<(StatusCode, Json<ApiResponse<BranchResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Branch created successfully",
            Some(created),
        )),
    ))
}

/// List active branches with pagination
#[utoipa::path(
    get,
    path = "/api/branches",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of branches", body = ApiResponse<Vec<BranchResponseDto>>),
    ),
    tag = "branches"
)]
pub async fn list_branches(
    State(service): State<Arc<BranchService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<BranchResponseDto>>>> {
    let branches = service.all(query.page, query.size).await?;
    Ok(Json(ApiResponse::success(
        "Branches fetched successfully",
        Some(branches),
    )))
}

/// Get a branch by id
#[utoipa::path(
    get,
    path = "/api/branches/{id}",
    params(("id" = i64, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch found", body = ApiResponse<BranchResponseDto>),
        (status = 404, description = "Branch not found")
    ),
    tag = "branches"
)]
pub async fn get_branch(
    State(service): State<Arc<BranchService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BranchResponseDto>>> {
    let branch = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Branch fetched successfully",
        Some(branch),
    )))
}

/// Update a branch
#[utoipa::path(
    put,
    path = "/api/branches/{id}",
    params(("id" = i64, Path, description = "Branch id")),
    request_body = UpdateBranchDto,
    responses(
        (status = 200, description = "Branch updated", body = ApiResponse<BranchResponseDto>),
        (status = 404, description = "Branch or referenced province not found")
    ),
    tag = "branches"
)]
pub async fn update_branch(
    State(service): State<Arc<BranchService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<UpdateBranchDto>,
) -> Result<Json<ApiResponse<BranchResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(
        "Branch updated successfully",
        Some(updated),
    )))
}

/// Soft-delete a branch
#[utoipa::path(
    delete,
    path = "/api/branches/{id}",
    params(("id" = i64, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch deleted"),
        (status = 404, description = "Branch not found")
    ),
    tag = "branches"
)]
pub async fn delete_branch(
    State(service): State<Arc<BranchService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        "Branch deleted successfully",
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::branches::routes;
    use crate::shared::test_helpers::{lazy_test_pool, with_test_user};
    use axum_test::TestServer;

    fn test_server() -> TestServer {
        let service = Arc::new(BranchService::new(lazy_test_pool()));
        TestServer::new(with_test_user(routes::routes(service))).unwrap()
    }

    #[tokio::test]
    async fn create_without_province_reference_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/branches")
            .json(&serde_json::json!({"name": "Denpasar"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Province must be provided"));
    }

    #[tokio::test]
    async fn create_without_province_id_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/branches")
            .json(&serde_json::json!({"name": "Denpasar", "province": {}}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Province must be provided"));
    }
}
