use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::stores::dtos::StoreResponseDto;
use crate::features::whitelist_stores::models::WhitelistStore;
use crate::shared::types::EntityRef;

/// Request DTO for whitelisting a store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWhitelistStoreDto {
    pub store: Option<EntityRef>,
}

/// Request DTO for retargeting a whitelist entry to another store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWhitelistStoreDto {
    pub store: Option<EntityRef>,
}

/// Response DTO for a whitelist entry with its store embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistStoreResponseDto {
    pub id: i64,
    pub store: StoreResponseDto,
}

impl WhitelistStoreResponseDto {
    pub fn from_parts(entry: WhitelistStore, store: StoreResponseDto) -> Self {
        Self {
            id: entry.id,
            store,
        }
    }
}
