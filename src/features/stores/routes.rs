use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::stores::handlers;
use crate::features::stores::services::StoreService;

/// Create routes for the stores feature
pub fn routes(service: Arc<StoreService>) -> Router {
    Router::new()
        .route(
            "/api/stores",
            post(handlers::create_store).get(handlers::list_stores),
        )
        .route(
            "/api/stores/{id}",
            get(handlers::get_store)
                .put(handlers::update_store)
                .delete(handlers::delete_store),
        )
        .with_state(service)
}
