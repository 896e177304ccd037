use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditAction;
use crate::features::audit::services::audit_log_service::{self, snapshot};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::branches::dtos::{BranchResponseDto, CreateBranchDto, UpdateBranchDto};
use crate::features::branches::models::Branch;
use crate::features::provinces::models::Province;
use crate::features::stores::models::Store;
use crate::shared::pagination::paginate;

const TABLE: &str = "branches";

const BRANCH_COLUMNS: &str = "id, name, is_active, is_deleted, province_id";

/// Service for branch operations
pub struct BranchService {
    pool: PgPool,
}

impl BranchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a branch under an existing province.
    pub async fn create(
        &self,
        dto: CreateBranchDto,
        user: &AuthenticatedUser,
    ) -> Result<BranchResponseDto> {
        let province_id = dto
            .province
            .as_ref()
            .and_then(|p| p.id)
            .ok_or_else(|| AppError::Validation("Province must be provided".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let province = resolve_province(&mut tx, province_id).await?;

        let branch = sqlx::query_as::<_, Branch>(
            "INSERT INTO branches (name, province_id) VALUES ($1, $2) \
             RETURNING id, name, is_active, is_deleted, province_id",
        )
        .bind(&dto.name)
        .bind(province.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert branch: {:?}", e);
            AppError::Database(e)
        })?;

        audit_log_service::log(
            &mut tx,
            TABLE,
            branch.id,
            user,
            AuditAction::Create,
            None,
            Some(snapshot(&branch)?),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Branch created: id={}", branch.id);
        self.hydrate(branch).await
    }

    /// Paginated list of active, non-deleted branches.
    pub async fn all(&self, page: usize, size: usize) -> Result<Vec<BranchResponseDto>> {
        let branches = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches \
             WHERE is_active = TRUE AND is_deleted = FALSE ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list branches: {:?}", e);
            AppError::Database(e)
        })?;

        let mut responses = Vec::new();
        for branch in paginate(branches, page, size) {
            responses.push(self.hydrate(branch).await?);
        }
        Ok(responses)
    }

    /// Get a branch by id with its province and stores embedded.
    pub async fn get(&self, id: i64) -> Result<BranchResponseDto> {
        let branch = self.fetch(id).await?;
        self.hydrate(branch).await
    }

    /// Overwrite name and flags; reassign the province only when a reference
    /// with an id is supplied.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateBranchDto,
        user: &AuthenticatedUser,
    ) -> Result<BranchResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))?;

        let old = snapshot(&existing)?;

        let province_id = match dto.province.as_ref().and_then(|p| p.id) {
            Some(new_id) => resolve_province(&mut tx, new_id).await?.id,
            None => existing.province_id,
        };

        let updated = sqlx::query_as::<_, Branch>(
            "UPDATE branches SET name = $1, is_active = $2, is_deleted = $3, province_id = $4 \
             WHERE id = $5 RETURNING id, name, is_active, is_deleted, province_id",
        )
        .bind(&dto.name)
        .bind(dto.is_active)
        .bind(dto.is_deleted)
        .bind(province_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update branch {}: {:?}", id, e);
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

        tracing::info!("Branch updated: id={}", id);
        self.hydrate(updated).await
    }

    /// Soft delete; repeatable, each call logs another DELETE row.
    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))?;

        let old = snapshot(&existing)?;

        sqlx::query("UPDATE branches SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to soft-delete branch {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        audit_log_service::log(&mut tx, TABLE, id, user, AuditAction::Delete, Some(old), None)
            .await?;

        tx.commit().await?;

        tracing::info!("Branch soft-deleted: id={}", id);
        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Branch> {
        sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch branch {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))
    }

    /// Resolves the embedded province and the branch's stores.
    async fn hydrate(&self, branch: Branch) -> Result<BranchResponseDto> {
        let province = sqlx::query_as::<_, Province>(
            "SELECT id, name, is_active, is_deleted FROM provinces WHERE id = $1",
        )
        .bind(branch.province_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch province {} for branch {}: {:?}",
                branch.province_id,
                branch.id,
                e
            );
            AppError::Database(e)
        })?;

        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, name, address, is_active, is_deleted, branch_id \
             FROM stores WHERE branch_id = $1 ORDER BY id",
        )
        .bind(branch.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch stores for branch {}: {:?}", branch.id, e);
            AppError::Database(e)
        })?;

        Ok(BranchResponseDto::from_parts(
            branch,
            province.into(),
            stores.into_iter().map(|s| s.into()).collect(),
        ))
    }
}

async fn resolve_province(conn: &mut PgConnection, id: i64) -> Result<Province> {
    sqlx::query_as::<_, Province>(
        "SELECT id, name, is_active, is_deleted FROM provinces WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to resolve province {}: {:?}", id, e);
        AppError::Database(e)
    })?
    .ok_or_else(|| AppError::NotFound("Province not found".to_string()))
}
