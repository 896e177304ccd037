mod whitelist_store_service;

pub use whitelist_store_service::WhitelistStoreService;
