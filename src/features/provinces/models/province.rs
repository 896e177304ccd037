use serde::Serialize;
use sqlx::FromRow;

/// Database model for a province. Serializable for audit snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
}
