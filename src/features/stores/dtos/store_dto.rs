use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::stores::models::Store;
use crate::shared::types::EntityRef;
use crate::shared::validation::not_blank;

/// Request DTO for creating a store. The branch reference is required and must
/// carry an id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreDto {
    #[validate(custom(function = not_blank))]
    pub name: String,

    #[validate(custom(function = not_blank))]
    pub address: String,

    pub branch: Option<EntityRef>,
}

/// Request DTO for updating a store. Name, address and flags are overwritten;
/// the branch is reassigned only when a reference with an id is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreDto {
    #[validate(custom(function = not_blank))]
    pub name: String,

    #[validate(custom(function = not_blank))]
    pub address: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub branch: Option<EntityRef>,
}

fn default_true() -> bool {
    true
}

/// Response DTO for a store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponseDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub branch_id: i64,
}

impl From<Store> for StoreResponseDto {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            address: store.address,
            is_active: store.is_active,
            is_deleted: store.is_deleted,
            branch_id: store.branch_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn blank_address_fails_validation() {
        let dto = CreateStoreDto {
            name: "Store A".to_string(),
            address: " ".to_string(),
            branch: Some(EntityRef { id: Some(1) }),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn response_serializes_branch_id_in_camel_case() {
        let body = serde_json::to_value(StoreResponseDto {
            id: 1,
            name: "Store A".to_string(),
            address: "Jl. X".to_string(),
            is_active: true,
            is_deleted: false,
            branch_id: 9,
        })
        .unwrap();
        assert_eq!(body["branchId"], 9);
    }
}
