//! Repository for the `categories` table.

use spendlog_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, PatchCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, sort_order, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category with a freshly generated id.
    ///
    /// A duplicate name fails on `uq_categories_name`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (id, name, sort_order)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// List every category in storage order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every category whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Replace `name` and `order` unconditionally.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, sort_order = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.order)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update: read the row, merge, write back.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        input: PatchCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Category>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = input.merge(&current);
        let update = format!(
            "UPDATE categories SET name = $2, sort_order = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&update)
            .bind(id)
            .bind(&merged.name)
            .bind(merged.order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(category))
    }

    /// Delete a category by ID, returning the removed row.
    ///
    /// Fails on `fk_expenses_category` while expenses still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("DELETE FROM categories WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
