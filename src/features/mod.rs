pub mod audit;
pub mod auth;
pub mod branches;
pub mod provinces;
pub mod stores;
pub mod whitelist_stores;
