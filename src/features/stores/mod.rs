//! Store management: stores belong to a branch and may be whitelisted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StoreService;
