//! Repository for the `field_options` table.

use sqlx::PgPool;
use insight_core::types::DbId;

use crate::models::field_option::{CreateFieldOption, FieldOption, UpdateFieldOption};

const COLUMNS: &str = "id, field_name, value, is_active, sort_order, created_at, updated_at";

/// Provides CRUD and ordering for form field options.
pub struct FieldOptionRepo;

impl FieldOptionRepo {
    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FieldOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM field_options WHERE id = $1");
        sqlx::query_as::<_, FieldOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Options for one field in display order.
    pub async fn list_by_field(
        pool: &PgPool,
        field_name: &str,
        active_only: bool,
    ) -> Result<Vec<FieldOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM field_options \
             WHERE field_name = $1 AND (is_active = true OR NOT $2) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, FieldOption>(&query)
            .bind(field_name)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Every option, grouped by field and in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<FieldOption>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM field_options ORDER BY field_name, sort_order, id");
        sqlx::query_as::<_, FieldOption>(&query).fetch_all(pool).await
    }

    /// Check that `id` is an active option of `field_name`.
    pub async fn is_active_option(
        pool: &PgPool,
        field_name: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM field_options \
             WHERE id = $1 AND field_name = $2 AND is_active = true)",
        )
        .bind(id)
        .bind(field_name)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert an option. Without an explicit `sort_order` it is appended after
    /// the field's current last option.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFieldOption,
    ) -> Result<FieldOption, sqlx::Error> {
        let query = format!(
            "INSERT INTO field_options (field_name, value, is_active, sort_order) \
             VALUES ($1, $2, COALESCE($3, true), \
                     COALESCE($4, (SELECT COALESCE(MAX(sort_order), 0) + 1 \
                                   FROM field_options WHERE field_name = $1))) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FieldOption>(&query)
            .bind(&input.field_name)
            .bind(&input.value)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update an option. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFieldOption,
    ) -> Result<Option<FieldOption>, sqlx::Error> {
        let query = format!(
            "UPDATE field_options SET \
                 value = COALESCE($2, value), \
                 is_active = COALESCE($3, is_active), \
                 sort_order = COALESCE($4, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FieldOption>(&query)
            .bind(id)
            .bind(&input.value)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an option. Fails with a foreign key violation while any event or
    /// feedback still references it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM field_options WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `sort_order` 1..n to `ids` in the given order within a transaction.
    ///
    /// Ids that do not belong to `field_name` are left untouched. Returns the
    /// field's options in their new order.
    pub async fn reorder(
        pool: &PgPool,
        field_name: &str,
        ids: &[DbId],
    ) -> Result<Vec<FieldOption>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, id) in ids.iter().enumerate() {
            sqlx::query(
                "UPDATE field_options SET sort_order = $3 \
                 WHERE id = $1 AND field_name = $2",
            )
            .bind(id)
            .bind(field_name)
            .bind(position as i32 + 1)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Self::list_by_field(pool, field_name, false).await
    }
}
