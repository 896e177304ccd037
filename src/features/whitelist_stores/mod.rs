//! Whitelist management: a whitelisted store stays visible in every province
//! search regardless of where it actually sits in the hierarchy.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::WhitelistStoreService;
