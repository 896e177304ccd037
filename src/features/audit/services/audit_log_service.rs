use chrono::Utc;
use serde::Serialize;
use sqlx::PgConnection;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditAction;
use crate::features::auth::model::AuthenticatedUser;

/// Appends one audit row on the caller's open transaction.
///
/// `old_value` is absent for CREATE, `new_value` is absent for DELETE. The
/// row is written with the current timestamp and never updated afterwards.
pub async fn log(
    conn: &mut PgConnection,
    table: &str,
    record_id: i64,
    user: &AuthenticatedUser,
    action: AuditAction,
    old_value: Option<String>,
    new_value: Option<String>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (table_name, record_id, user_id, action, old_value, new_value, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(table)
    .bind(record_id)
    .bind(user.id)
    .bind(action.as_str())
    .bind(old_value)
    .bind(new_value)
    .bind(Utc::now())
    .execute(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to write audit log for {}#{}: {:?}", table, record_id, e);
        AppError::Database(e)
    })?;

    Ok(())
}

/// Serializes an entity row into the opaque string snapshot stored in
/// `old_value`/`new_value`.
pub fn snapshot<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize audit snapshot: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    #[test]
    fn snapshot_captures_entity_state_as_json() {
        let value = snapshot(&Row { id: 3, name: "Bali" }).unwrap();
        assert_eq!(value, r#"{"id":3,"name":"Bali"}"#);
    }
}
