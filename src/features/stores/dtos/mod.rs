mod store_dto;

pub use store_dto::{CreateStoreDto, StoreResponseDto, UpdateStoreDto};
