use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::branches::{dtos as branches_dtos, handlers as branches_handlers};
use crate::features::provinces::{dtos as provinces_dtos, handlers as provinces_handlers};
use crate::features::stores::{dtos as stores_dtos, handlers as stores_handlers};
use crate::features::whitelist_stores::{
    dtos as whitelist_dtos, handlers as whitelist_handlers,
};
use crate::shared::types::{ApiResponse, EntityRef};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Provinces
        provinces_handlers::create_province,
        provinces_handlers::list_provinces,
        provinces_handlers::get_province,
        provinces_handlers::update_province,
        provinces_handlers::delete_province,
        provinces_handlers::search_provinces,
        provinces_handlers::search_stores_by_province,
        // Branches
        branches_handlers::create_branch,
        branches_handlers::list_branches,
        branches_handlers::get_branch,
        branches_handlers::update_branch,
        branches_handlers::delete_branch,
        // Stores
        stores_handlers::create_store,
        stores_handlers::list_stores,
        stores_handlers::get_store,
        stores_handlers::update_store,
        stores_handlers::delete_store,
        // Whitelist stores
        whitelist_handlers::create_whitelist_store,
        whitelist_handlers::list_whitelist_stores,
        whitelist_handlers::get_whitelist_store,
        whitelist_handlers::update_whitelist_store,
        whitelist_handlers::delete_whitelist_store,
    ),
    components(
        schemas(
            // Shared
            EntityRef,
            // Provinces
            provinces_dtos::CreateProvinceDto,
            provinces_dtos::UpdateProvinceDto,
            provinces_dtos::ProvinceResponseDto,
            provinces_dtos::StoreSearchResponseDto,
            ApiResponse<provinces_dtos::ProvinceResponseDto>,
            ApiResponse<Vec<provinces_dtos::ProvinceResponseDto>>,
            ApiResponse<provinces_dtos::StoreSearchResponseDto>,
            // Branches
            branches_dtos::CreateBranchDto,
            branches_dtos::UpdateBranchDto,
            branches_dtos::BranchResponseDto,
            ApiResponse<branches_dtos::BranchResponseDto>,
            ApiResponse<Vec<branches_dtos::BranchResponseDto>>,
            // Stores
            stores_dtos::CreateStoreDto,
            stores_dtos::UpdateStoreDto,
            stores_dtos::StoreResponseDto,
            ApiResponse<stores_dtos::StoreResponseDto>,
            ApiResponse<Vec<stores_dtos::StoreResponseDto>>,
            // Whitelist stores
            whitelist_dtos::CreateWhitelistStoreDto,
            whitelist_dtos::UpdateWhitelistStoreDto,
            whitelist_dtos::WhitelistStoreResponseDto,
            ApiResponse<whitelist_dtos::WhitelistStoreResponseDto>,
        )
    ),
    tags(
        (name = "provinces", description = "Province management and store search"),
        (name = "branches", description = "Branch management under provinces"),
        (name = "stores", description = "Store management under branches"),
        (name = "whitelist-stores", description = "Store whitelist management"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Indostore API",
        version = "0.1.0",
        description = "API documentation for the Indostore backend",
    )
)]
pub struct ApiDoc;

/// Adds the Bearer token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
