//! Branch management: branches belong to a province and own stores.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BranchService;
