use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::branches::handlers;
use crate::features::branches::services::BranchService;

/// Create routes for the branches feature
pub fn routes(service: Arc<BranchService>) -> Router {
    Router::new()
        .route(
            "/api/branches",
            post(handlers::create_branch).get(handlers::list_branches),
        )
        .route(
            "/api/branches/{id}",
            get(handlers::get_branch)
                .put(handlers::update_branch)
                .delete(handlers::delete_branch),
        )
        .with_state(service)
}
