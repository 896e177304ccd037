use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::provinces::dtos::{
    CreateProvinceDto, ProvinceResponseDto, StoreSearchResponseDto, UpdateProvinceDto,
};
use crate::features::provinces::services::ProvinceService;
use crate::shared::types::{default_page, default_page_size, ApiResponse, PaginationQuery};

/// Query params for name search endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Name to match (case-insensitive substring)
    pub name: String,

    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_page_size")]
    pub size: usize,
}

/// Create a new province
#[utoipa::path(
    post,
    path = "/api/provinces",
    request_body = CreateProvinceDto,
    responses(
        (status = 201, description = "Province created", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "provinces"
)]
pub async fn create_province(
    State(service): State<Arc<ProvinceService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateProvinceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinceResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Province created successfully",
            Some(created),
        )),
    ))
}

/// List active provinces with pagination
#[utoipa::path(
    get,
    path = "/api/provinces",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>),
    ),
    tag = "provinces"
)]
pub async fn list_provinces(
    State(service): State<Arc<ProvinceService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.all(query.page, query.size).await?;
    Ok(Json(ApiResponse::success(
        "Provinces fetched successfully",
        Some(provinces),
    )))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/provinces/{id}",
    params(("id" = i64, Path, description = "Province id")),
    responses(
        (status = 200, description = "Province found", body = ApiResponse<ProvinceResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn get_province(
    State(service): State<Arc<ProvinceService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Province fetched successfully",
        Some(province),
    )))
}

/// Update a province
#[utoipa::path(
    put,
    path = "/api/provinces/{id}",
    params(("id" = i64, Path, description = "Province id")),
    request_body = UpdateProvinceDto,
    responses(
        (status = 200, description = "Province updated", body = ApiResponse<ProvinceResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn update_province(
    State(service): State<Arc<ProvinceService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<UpdateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(
        "Province updated successfully",
        Some(updated),
    )))
}

/// Soft-delete a province
#[utoipa::path(
    delete,
    path = "/api/provinces/{id}",
    params(("id" = i64, Path, description = "Province id")),
    responses(
        (status = 200, description = "Province deleted"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn delete_province(
    State(service): State<Arc<ProvinceService>>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        "Province deleted successfully",
        None,
    )))
}

/// Search provinces by name
#[utoipa::path(
    get,
    path = "/api/provinces/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching provinces", body = ApiResponse<Vec<ProvinceResponseDto>>),
    ),
    tag = "provinces"
)]
pub async fn search_provinces(
    State(service): State<Arc<ProvinceService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service
        .search_by_name(&query.name, query.page, query.size)
        .await?;
    Ok(Json(ApiResponse::success(
        "Provinces fetched successfully",
        Some(provinces),
    )))
}

/// Search stores by province name, including globally whitelisted stores
#[utoipa::path(
    get,
    path = "/api/provinces/search/stores",
    params(SearchQuery),
    responses(
        (status = 200, description = "Province and whitelist stores", body = ApiResponse<StoreSearchResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn search_stores_by_province(
    State(service): State<Arc<ProvinceService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<StoreSearchResponseDto>>> {
    let stores = service
        .search_stores_by_province(&query.name, query.page, query.size)
        .await?;
    Ok(Json(ApiResponse::success(
        "Stores fetched successfully by province",
        Some(stores),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::provinces::routes;
    use crate::shared::test_helpers::{lazy_test_pool, with_test_user};
    use axum_test::TestServer;

    fn test_server() -> TestServer {
        let service = Arc::new(ProvinceService::new(lazy_test_pool()));
        TestServer::new(with_test_user(routes::routes(service))).unwrap()
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let server = test_server();
        let response = server
            .post("/api/provinces")
            .json(&serde_json::json!({"name": "   "}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("blank"));
    }

    #[tokio::test]
    async fn create_rejects_missing_name() {
        let server = test_server();
        let response = server
            .post("/api/provinces")
            .json(&serde_json::json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
