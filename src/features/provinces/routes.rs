use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::provinces::handlers;
use crate::features::provinces::services::ProvinceService;

/// Create routes for the provinces feature
pub fn routes(service: Arc<ProvinceService>) -> Router {
    Router::new()
        .route(
            "/api/provinces",
            post(handlers::create_province).get(handlers::list_provinces),
        )
        .route("/api/provinces/search", get(handlers::search_provinces))
        .route(
            "/api/provinces/search/stores",
            get(handlers::search_stores_by_province),
        )
        .route(
            "/api/provinces/{id}",
            get(handlers::get_province)
                .put(handlers::update_province)
                .delete(handlers::delete_province),
        )
        .with_state(service)
}
