use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditAction;
use crate::features::audit::services::audit_log_service::{self, snapshot};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::branches::models::Branch;
use crate::features::stores::dtos::{CreateStoreDto, StoreResponseDto, UpdateStoreDto};
use crate::features::stores::models::Store;
use crate::shared::pagination::paginate;

const TABLE: &str = "stores";

const STORE_COLUMNS: &str = "id, name, address, is_active, is_deleted, branch_id";

/// Service for store operations
pub struct StoreService {
    pool: PgPool,
}

impl StoreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store under an existing branch.
    pub async fn create(
        &self,
        dto: CreateStoreDto,
        user: &AuthenticatedUser,
    ) -> Result<StoreResponseDto> {
        let branch_id = dto
            .branch
            .as_ref()
            .and_then(|b| b.id)
            .ok_or_else(|| AppError::Validation("Branch must be provided".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let branch = resolve_branch(&mut tx, branch_id).await?;

        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name, address, branch_id) VALUES ($1, $2, $3) \
             RETURNING id, name, address, is_active, is_deleted, branch_id",
        )
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(branch.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert store: {:?}", e);
            AppError::Database(e)
        })?;

        audit_log_service::log(
            &mut tx,
            TABLE,
            store.id,
            user,
            AuditAction::Create,
            None,
            Some(snapshot(&store)?),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Store created: id={}", store.id);
        Ok(store.into())
    }

    /// Paginated list of active, non-deleted stores.
    pub async fn all(&self, page: usize, size: usize) -> Result<Vec<StoreResponseDto>> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores \
             WHERE is_active = TRUE AND is_deleted = FALSE ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list stores: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(paginate(stores, page, size)
            .into_iter()
            .map(|s| s.into())
            .collect())
    }

    /// Get a store by id. Soft-deleted rows remain retrievable here.
    pub async fn get(&self, id: i64) -> Result<StoreResponseDto> {
        let store = self.fetch(id).await?;
        Ok(store.into())
    }

    /// Overwrite name, address and flags; reassign the branch only when a
    /// reference with an id is supplied.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateStoreDto,
        user: &AuthenticatedUser,
    ) -> Result<StoreResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

        let old = snapshot(&existing)?;

        let branch_id = match dto.branch.as_ref().and_then(|b| b.id) {
            Some(new_id) => resolve_branch(&mut tx, new_id).await?.id,
            None => existing.branch_id,
        };

        let updated = sqlx::query_as::<_, Store>(
            "UPDATE stores SET name = $1, address = $2, is_active = $3, is_deleted = $4, \
             branch_id = $5 WHERE id = $6 \
             RETURNING id, name, address, is_active, is_deleted, branch_id",
        )
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(dto.is_active)
        .bind(dto.is_deleted)
        .bind(branch_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update store {}: {:?}", id, e);
            AppError::Database(e)
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

        tracing::info!("Store updated: id={}", id);
        Ok(updated.into())
    }

    /// Soft delete; repeatable, each call logs another DELETE row.
    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

        let old = snapshot(&existing)?;

        sqlx::query("UPDATE stores SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to soft-delete store {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        audit_log_service::log(&mut tx, TABLE, id, user, AuditAction::Delete, Some(old), None)
            .await?;

        tx.commit().await?;

        tracing::info!("Store soft-deleted: id={}", id);
        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Store> {
        sqlx::query_as::<_, Store>(&format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch store {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
    }
}

async fn resolve_branch(conn: &mut PgConnection, id: i64) -> Result<Branch> {
    sqlx::query_as::<_, Branch>(
        "SELECT id, name, is_active, is_deleted, province_id FROM branches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to resolve branch {}: {:?}", id, e);
        AppError::Database(e)
    })?
    .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))
}
