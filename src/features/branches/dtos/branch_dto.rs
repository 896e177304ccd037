use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::branches::models::Branch;
use crate::features::provinces::dtos::ProvinceResponseDto;
use crate::features::stores::dtos::StoreResponseDto;
use crate::shared::types::EntityRef;
use crate::shared::validation::not_blank;

/// Request DTO for creating a branch. The province reference is required and
/// must carry an id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchDto {
    #[validate(custom(function = not_blank))]
    pub name: String,

    pub province: Option<EntityRef>,
}

/// Request DTO for updating a branch. Name and flags are overwritten; the
/// province is reassigned only when a reference with an id is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchDto {
    #[validate(custom(function = not_blank))]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub province: Option<EntityRef>,
}

fn default_true() -> bool {
    true
}

/// Response DTO for a branch, embedding the owning province and the branch's
/// stores (both resolved by derived queries).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponseDto {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub province: ProvinceResponseDto,
    pub stores: Vec<StoreResponseDto>,
}

impl BranchResponseDto {
    pub fn from_parts(
        branch: Branch,
        province: ProvinceResponseDto,
        stores: Vec<StoreResponseDto>,
    ) -> Self {
        Self {
            id: branch.id,
            name: branch.name,
            is_active: branch.is_active,
            is_deleted: branch.is_deleted,
            province,
            stores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_deserializes_nested_province_reference() {
        let dto: CreateBranchDto =
            serde_json::from_str(r#"{"name": "Denpasar", "province": {"id": 1}}"#).unwrap();
        assert_eq!(dto.province.and_then(|p| p.id), Some(1));
    }

    #[test]
    fn create_tolerates_missing_province_at_parse_time() {
        // The reference requirement is enforced by the service, not serde.
        let dto: CreateBranchDto = serde_json::from_str(r#"{"name": "Denpasar"}"#).unwrap();
        assert!(dto.province.is_none());
    }
}
