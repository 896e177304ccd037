use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The kind of mutation an audit row documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

/// Database model for an audit log row. Immutable once written.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct AuditLog {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub user_id: i64,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_to_upper_case_verbs() {
        assert_eq!(AuditAction::Create.as_str(), "CREATE");
        assert_eq!(AuditAction::Update.as_str(), "UPDATE");
        assert_eq!(AuditAction::Delete.as_str(), "DELETE");
    }
}
