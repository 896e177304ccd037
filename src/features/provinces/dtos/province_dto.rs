use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::provinces::models::Province;
use crate::features::stores::dtos::StoreResponseDto;
use crate::shared::validation::not_blank;

/// Request DTO for creating a province
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvinceDto {
    #[validate(custom(function = not_blank))]
    pub name: String,
}

/// Request DTO for updating a province. All fields are overwritten; omitted
/// flags fall back to the entity defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvinceDto {
    #[validate(custom(function = not_blank))]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,
}

fn default_true() -> bool {
    true
}

/// Response DTO for a province
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceResponseDto {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
            is_active: province.is_active,
            is_deleted: province.is_deleted,
        }
    }
}

/// Response DTO for the province store search: the province's own stores plus
/// the globally whitelisted stores, each paginated independently.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSearchResponseDto {
    pub province_stores: Vec<StoreResponseDto>,
    pub whitelist_stores: Vec<StoreResponseDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn blank_name_fails_validation() {
        let dto = CreateProvinceDto { name: "   ".to_string() };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_flags_default_to_entity_defaults() {
        let dto: UpdateProvinceDto = serde_json::from_str(r#"{"name": "Bali"}"#).unwrap();
        assert!(dto.is_active);
        assert!(!dto.is_deleted);
    }

    #[test]
    fn response_serializes_in_camel_case() {
        let body = serde_json::to_value(ProvinceResponseDto {
            id: 1,
            name: "Bali".to_string(),
            is_active: true,
            is_deleted: false,
        })
        .unwrap();
        assert_eq!(body["isActive"], true);
        assert_eq!(body["isDeleted"], false);
    }
}
