use serde::Serialize;
use sqlx::FromRow;

/// Database model for a whitelist entry. `store_id` is unique: a store can
/// appear in at most one entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WhitelistStore {
    pub id: i64,
    pub store_id: i64,
}
