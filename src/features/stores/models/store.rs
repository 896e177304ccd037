use serde::Serialize;
use sqlx::FromRow;

/// Database model for a store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub branch_id: i64,
}
