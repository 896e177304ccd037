use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditAction;
use crate::features::audit::services::audit_log_service::{self, snapshot};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::provinces::dtos::{
    CreateProvinceDto, ProvinceResponseDto, StoreSearchResponseDto, UpdateProvinceDto,
};
use crate::features::provinces::models::Province;
use crate::features::stores::models::Store;
use crate::shared::pagination::paginate;

const TABLE: &str = "provinces";

const PROVINCE_COLUMNS: &str = "id, name, is_active, is_deleted";

/// Service for province operations
pub struct ProvinceService {
    pool: PgPool,
}

impl ProvinceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a province and log the creation on the same transaction.
    pub async fn create(
        &self,
        dto: CreateProvinceDto,
        user: &AuthenticatedUser,
    ) -> Result<ProvinceResponseDto> {
        let mut tx = self.pool.begin().await?;

        let province = sqlx::query_as::<_, Province>(
            "INSERT INTO provinces (name) VALUES ($1) RETURNING id, name, is_active, is_deleted",
        )
        .bind(&dto.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert province: {:?}", e);
            AppError::Database(e)
        })?;

        audit_log_service::log(
            &mut tx,
            TABLE,
            province.id,
            user,
            AuditAction::Create,
            None,
            Some(snapshot(&province)?),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Province created: id={}", province.id);
        Ok(province.into())
    }

    /// Paginated list of active, non-deleted provinces.
    pub async fn all(&self, page: usize, size: usize) -> Result<Vec<ProvinceResponseDto>> {
        let provinces = sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces \
             WHERE is_active = TRUE AND is_deleted = FALSE ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list provinces: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(paginate(provinces, page, size)
            .into_iter()
            .map(|p| p.into())
            .collect())
    }

    /// Get a province by id. Soft-deleted rows remain retrievable here.
    pub async fn get(&self, id: i64) -> Result<ProvinceResponseDto> {
        let province = self.fetch(id).await?;
        Ok(province.into())
    }

    /// Overwrite name and flags, logging before/after snapshots.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateProvinceDto,
        user: &AuthenticatedUser,
    ) -> Result<ProvinceResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Province not found".to_string()))?;

        let old = snapshot(&existing)?;

        let updated = sqlx::query_as::<_, Province>(
            "UPDATE provinces SET name = $1, is_active = $2, is_deleted = $3 \
             WHERE id = $4 RETURNING id, name, is_active, is_deleted",
        )
        .bind(&dto.name)
        .bind(dto.is_active)
        .bind(dto.is_deleted)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update province {}: {:?}", id, e);
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

        tracing::info!("Province updated: id={}", id);
        Ok(updated.into())
    }

    /// Soft delete: sets `is_deleted` and keeps the row. Deleting an
    /// already-deleted province succeeds and logs another DELETE row.
    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Province not found".to_string()))?;

        let old = snapshot(&existing)?;

        sqlx::query("UPDATE provinces SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to soft-delete province {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        audit_log_service::log(&mut tx, TABLE, id, user, AuditAction::Delete, Some(old), None)
            .await?;

        tx.commit().await?;

        tracing::info!("Province soft-deleted: id={}", id);
        Ok(())
    }

    /// Case-insensitive substring search over active, non-deleted provinces.
    pub async fn search_by_name(
        &self,
        name: &str,
        page: usize,
        size: usize,
    ) -> Result<Vec<ProvinceResponseDto>> {
        let pattern = like_pattern(name);
        let provinces = sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces \
             WHERE LOWER(name) LIKE $1 AND is_active = TRUE AND is_deleted = FALSE ORDER BY id",
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search provinces: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(paginate(provinces, page, size)
            .into_iter()
            .map(|p| p.into())
            .collect())
    }

    /// Stores of the first province matching `name`, plus the global
    /// whitelist.
    ///
    /// Whitelisted stores are intentionally NOT scoped to the matched
    /// province: they are meant to be visible everywhere. Both lists are
    /// paginated independently with the same page/size.
    pub async fn search_stores_by_province(
        &self,
        name: &str,
        page: usize,
        size: usize,
    ) -> Result<StoreSearchResponseDto> {
        let pattern = like_pattern(name);
        let province = sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces \
             WHERE LOWER(name) LIKE $1 AND is_active = TRUE AND is_deleted = FALSE \
             ORDER BY id LIMIT 1",
        ))
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search province by name: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Province not found".to_string()))?;

        let province_stores = sqlx::query_as::<_, Store>(
            "SELECT s.id, s.name, s.address, s.is_active, s.is_deleted, s.branch_id \
             FROM stores s \
             JOIN branches b ON b.id = s.branch_id \
             WHERE b.province_id = $1 AND s.is_active = TRUE AND s.is_deleted = FALSE \
             ORDER BY s.id",
        )
        .bind(province.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch stores for province {}: {:?}", province.id, e);
            AppError::Database(e)
        })?;

        let whitelist_stores = sqlx::query_as::<_, Store>(
            "SELECT s.id, s.name, s.address, s.is_active, s.is_deleted, s.branch_id \
             FROM whitelist_stores w \
             JOIN stores s ON s.id = w.store_id \
             WHERE s.is_active = TRUE AND s.is_deleted = FALSE \
             ORDER BY w.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch whitelist stores: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(StoreSearchResponseDto {
            province_stores: paginate(province_stores, page, size)
                .into_iter()
                .map(|s| s.into())
                .collect(),
            whitelist_stores: paginate(whitelist_stores, page, size)
                .into_iter()
                .map(|s| s.into())
                .collect(),
        })
    }

    async fn fetch(&self, id: i64) -> Result<Province> {
        sqlx::query_as::<_, Province>(&format!(
            "SELECT {PROVINCE_COLUMNS} FROM provinces WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch province {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Province not found".to_string()))
    }
}

/// Lowercased `%name%` pattern with LIKE metacharacters escaped, so user
/// input like `100%` or `a_b` matches literally.
fn like_pattern(name: &str) -> String {
    let escaped = name
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::provinces::dtos::CreateProvinceDto;
    use crate::shared::test_helpers::seed_user;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Bali"), "%bali%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\d"), "%c:\\\\d%");
    }

    #[sqlx::test]
    async fn create_writes_exactly_one_audit_row(pool: sqlx::PgPool) {
        let user = seed_user(&pool).await;
        let service = ProvinceService::new(pool.clone());

        let created = service
            .create(
                CreateProvinceDto {
                    name: "Bali".to_string(),
                },
                &user,
            )
            .await
            .unwrap();

        let rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_logs WHERE table_name = 'provinces' AND record_id = $1",
        )
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(rows, 1);
    }

    #[sqlx::test]
    async fn repeated_delete_succeeds_and_logs_each_time(pool: sqlx::PgPool) {
        let user = seed_user(&pool).await;
        let service = ProvinceService::new(pool.clone());

        let created = service
            .create(
                CreateProvinceDto {
                    name: "Bali".to_string(),
                },
                &user,
            )
            .await
            .unwrap();

        service.delete(created.id, &user).await.unwrap();
        service.delete(created.id, &user).await.unwrap();

        let deleted = service.get(created.id).await.unwrap();
        assert!(deleted.is_deleted);

        let delete_rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_logs \
             WHERE table_name = 'provinces' AND record_id = $1 AND action = 'DELETE'",
        )
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(delete_rows, 2);
    }

    #[sqlx::test]
    async fn store_search_paginates_both_lists_independently(pool: sqlx::PgPool) {
        let province_id: i64 =
            sqlx::query_scalar("INSERT INTO provinces (name) VALUES ('Bali') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();
        let branch_id: i64 = sqlx::query_scalar(
            "INSERT INTO branches (name, province_id) VALUES ('Denpasar', $1) RETURNING id",
        )
        .bind(province_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        for name in ["Store A", "Store B", "Store C"] {
            sqlx::query("INSERT INTO stores (name, address, branch_id) VALUES ($1, 'Jl. X', $2)")
                .bind(name)
                .bind(branch_id)
                .execute(&pool)
                .await
                .unwrap();
        }

        // A whitelisted store in a different province: the whitelist side of
        // the search is global.
        let other_province: i64 =
            sqlx::query_scalar("INSERT INTO provinces (name) VALUES ('Papua') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();
        let other_branch: i64 = sqlx::query_scalar(
            "INSERT INTO branches (name, province_id) VALUES ('Jayapura', $1) RETURNING id",
        )
        .bind(other_province)
        .fetch_one(&pool)
        .await
        .unwrap();
        let other_store: i64 = sqlx::query_scalar(
            "INSERT INTO stores (name, address, branch_id) VALUES ('Store D', 'Jl. Y', $1) \
             RETURNING id",
        )
        .bind(other_branch)
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO whitelist_stores (store_id) VALUES ($1)")
            .bind(other_store)
            .execute(&pool)
            .await
            .unwrap();

        let service = ProvinceService::new(pool.clone());

        let first = service.search_stores_by_province("bali", 0, 2).await.unwrap();
        assert_eq!(first.province_stores.len(), 2);
        assert_eq!(first.whitelist_stores.len(), 1);
        assert_eq!(first.whitelist_stores[0].id, other_store);

        let second = service.search_stores_by_province("bali", 1, 2).await.unwrap();
        assert_eq!(second.province_stores.len(), 1);
        assert!(second.whitelist_stores.is_empty());
    }
}
