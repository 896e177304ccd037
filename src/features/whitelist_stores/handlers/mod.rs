pub mod whitelist_store_handler;

pub use whitelist_store_handler::*;
