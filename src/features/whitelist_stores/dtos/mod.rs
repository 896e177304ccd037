mod whitelist_store_dto;

pub use whitelist_store_dto::{
    CreateWhitelistStoreDto, UpdateWhitelistStoreDto, WhitelistStoreResponseDto,
};
