use serde::Serialize;
use sqlx::FromRow;

/// Database model for a branch. The owning province is a plain foreign key;
/// the province-to-branches direction is a derived query, not a stored
/// back-pointer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub province_id: i64,
}
