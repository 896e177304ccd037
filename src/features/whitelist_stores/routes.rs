use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::whitelist_stores::handlers;
use crate::features::whitelist_stores::services::WhitelistStoreService;

/// Create routes for the whitelist stores feature
pub fn routes(service: Arc<WhitelistStoreService>) -> Router {
    Router::new()
        .route(
            "/api/whitelist-stores",
            post(handlers::create_whitelist_store).get(handlers::list_whitelist_stores),
        )
        .route(
            "/api/whitelist-stores/{id}",
            get(handlers::get_whitelist_store)
                .put(handlers::update_whitelist_store)
                .delete(handlers::delete_whitelist_store),
        )
        .with_state(service)
}
