use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditAction;
use crate::features::audit::services::audit_log_service::{self, snapshot};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stores::dtos::StoreResponseDto;
use crate::features::stores::models::Store;
use crate::features::whitelist_stores::dtos::{
    CreateWhitelistStoreDto, UpdateWhitelistStoreDto, WhitelistStoreResponseDto,
};
use crate::features::whitelist_stores::models::WhitelistStore;
use crate::shared::pagination::paginate;

const TABLE: &str = "whitelist_stores";

/// Service for whitelist entry operations
pub struct WhitelistStoreService {
    pool: PgPool,
}

impl WhitelistStoreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whitelist a store. Conflicts when an entry already exists for it; the
    /// UNIQUE constraint on store_id backs the pre-insert check, so a race
    /// between two creations still resolves to one entry plus one conflict.
    ///
    /// The CREATE audit row is keyed by the store's id, not the entry's.
    pub async fn create(
        &self,
        dto: CreateWhitelistStoreDto,
        user: &AuthenticatedUser,
    ) -> Result<WhitelistStoreResponseDto> {
        let store_id = dto
            .store
            .as_ref()
            .and_then(|s| s.id)
            .ok_or_else(|| AppError::Validation("Store must be provided".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let store = resolve_store(&mut tx, store_id).await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM whitelist_stores WHERE store_id = $1)",
        )
        .bind(store.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if exists {
            return Err(AppError::Conflict("Store is already whitelisted".to_string()));
        }

        let entry = sqlx::query_as::<_, WhitelistStore>(
            "INSERT INTO whitelist_stores (store_id) VALUES ($1) RETURNING id, store_id",
        )
        .bind(store.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict("Store is already whitelisted".to_string())
            } else {
                tracing::error!("Failed to insert whitelist entry: {:?}", e);
                AppError::Database(e)
            }
        })?;

        audit_log_service::log(
            &mut tx,
            TABLE,
            store.id,
            user,
            AuditAction::Create,
            None,
            Some(snapshot(&entry)?),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Store whitelisted: entry={}, store={}", entry.id, store.id);
        Ok(WhitelistStoreResponseDto::from_parts(entry, store.into()))
    }

    /// Paginated list of the whitelisted stores themselves (active and
    /// non-deleted only).
    pub async fn all(&self, page: usize, size: usize) -> Result<Vec<StoreResponseDto>> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT s.id, s.name, s.address, s.is_active, s.is_deleted, s.branch_id \
             FROM whitelist_stores w \
             JOIN stores s ON s.id = w.store_id \
             WHERE s.is_active = TRUE AND s.is_deleted = FALSE \
             ORDER BY w.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list whitelist stores: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(paginate(stores, page, size)
            .into_iter()
            .map(|s| s.into())
            .collect())
    }

    /// Get a whitelist entry by id with its store embedded.
    pub async fn get(&self, id: i64) -> Result<WhitelistStoreResponseDto> {
        let entry = sqlx::query_as::<_, WhitelistStore>(
            "SELECT id, store_id FROM whitelist_stores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch whitelist entry {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Whitelist store not found".to_string()))?;

        let mut conn = self.pool.acquire().await?;
        let store = resolve_store(&mut conn, entry.store_id).await?;

        Ok(WhitelistStoreResponseDto::from_parts(entry, store.into()))
    }

    /// Retarget an entry to another existing store.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateWhitelistStoreDto,
        user: &AuthenticatedUser,
    ) -> Result<WhitelistStoreResponseDto> {
        let store_id = dto
            .store
            .as_ref()
            .and_then(|s| s.id)
            .ok_or_else(|| AppError::Validation("Store must be provided".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, WhitelistStore>(
            "SELECT id, store_id FROM whitelist_stores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Whitelist store not found".to_string()))?;

        let store = resolve_store(&mut tx, store_id).await?;

        let old = snapshot(&existing)?;

        let updated = sqlx::query_as::<_, WhitelistStore>(
            "UPDATE whitelist_stores SET store_id = $1 WHERE id = $2 RETURNING id, store_id",
        )
        .bind(store.id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict("Store is already whitelisted".to_string())
            } else {
                tracing::error!("Failed to update whitelist entry {}: {:?}", id, e);
                AppError::Database(e)
            }
        })?;

        audit_log_service::log(
            &mut tx,
            TABLE,
            id,
            user,
            AuditAction::Update,
            Some(old),
            Some(snapshot(&updated)?),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Whitelist entry updated: id={}", id);
        Ok(WhitelistStoreResponseDto::from_parts(updated, store.into()))
    }

    /// Hard delete by id, with no pre-load and no captured snapshots. The
    /// DELETE row is logged even when no entry matched.
    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM whitelist_stores WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete whitelist entry {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        audit_log_service::log(&mut tx, TABLE, id, user, AuditAction::Delete, None, None).await?;

        tx.commit().await?;

        tracing::info!("Whitelist entry deleted: id={}", id);
        Ok(())
    }
}

async fn resolve_store(conn: &mut PgConnection, id: i64) -> Result<Store> {
    sqlx::query_as::<_, Store>(
        "SELECT id, name, address, is_active, is_deleted, branch_id FROM stores WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to resolve store {}: {:?}", id, e);
        AppError::Database(e)
    })?
    .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::seed_user;
    use crate::shared::types::EntityRef;

    async fn seed_store(pool: &PgPool) -> i64 {
        let province_id: i64 =
            sqlx::query_scalar("INSERT INTO provinces (name) VALUES ('Bali') RETURNING id")
                .fetch_one(pool)
                .await
                .unwrap();
        let branch_id: i64 = sqlx::query_scalar(
            "INSERT INTO branches (name, province_id) VALUES ('Denpasar', $1) RETURNING id",
        )
        .bind(province_id)
        .fetch_one(pool)
        .await
        .unwrap();
        sqlx::query_scalar(
            "INSERT INTO stores (name, address, branch_id) VALUES ('Store A', 'Jl. X', $1) \
             RETURNING id",
        )
        .bind(branch_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn store_ref(id: i64) -> CreateWhitelistStoreDto {
        CreateWhitelistStoreDto {
            store: Some(EntityRef { id: Some(id) }),
        }
    }

    #[sqlx::test]
    async fn duplicate_creation_conflicts_and_inserts_nothing(pool: sqlx::PgPool) {
        let user = seed_user(&pool).await;
        let store_id = seed_store(&pool).await;
        let service = WhitelistStoreService::new(pool.clone());

        service.create(store_ref(store_id), &user).await.unwrap();

        let err = service
            .create(store_ref(store_id), &user)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let entries: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM whitelist_stores WHERE store_id = $1")
                .bind(store_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(entries, 1);

        // The failed attempt must not leave an audit row either.
        let audit_rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_logs \
             WHERE table_name = 'whitelist_stores' AND action = 'CREATE'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(audit_rows, 1);
    }
}
