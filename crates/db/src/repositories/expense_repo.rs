//! Repository for the `expenses` table.

use std::collections::HashMap;

use spendlog_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::expense::{CreateExpense, Expense, ExpenseDetail, PatchExpense, UpdateExpense};
use crate::models::note::Note;
use crate::repositories::{CategoryRepo, NoteRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, description, amount, category_id, inserted_at, spent_at, created_at, updated_at";

/// Provides CRUD operations for expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense with a freshly generated id.
    ///
    /// Omitted timestamps default to `NOW()`. An unknown `category_id`
    /// fails on `fk_expenses_category`.
    pub async fn create(pool: &PgPool, input: &CreateExpense) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (id, description, amount, category_id, spent_at, inserted_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(new_id())
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.category_id)
            .bind(input.spent_at)
            .bind(input.inserted_at)
            .fetch_one(pool)
            .await
    }

    /// List every expense in storage order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses");
        sqlx::query_as::<_, Expense>(&query).fetch_all(pool).await
    }

    /// Find an expense by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every expense with its category and notes resolved.
    pub async fn list_details(pool: &PgPool) -> Result<Vec<ExpenseDetail>, sqlx::Error> {
        let expenses = Self::list(pool).await?;
        Self::with_details(pool, expenses).await
    }

    /// Find an expense by ID with its category and notes resolved.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ExpenseDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(expense) => Ok(Self::with_details(pool, vec![expense]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Resolve categories and notes for a batch of expenses.
    ///
    /// Issues one query per related table regardless of batch size.
    pub async fn with_details(
        pool: &PgPool,
        expenses: Vec<Expense>,
    ) -> Result<Vec<ExpenseDetail>, sqlx::Error> {
        let mut category_ids: Vec<DbId> = expenses.iter().map(|e| e.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        let expense_ids: Vec<DbId> = expenses.iter().map(|e| e.id).collect();

        let categories: HashMap<DbId, _> = CategoryRepo::find_by_ids(pool, &category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        if categories.len() < category_ids.len() {
            tracing::warn!(
                requested = category_ids.len(),
                resolved = categories.len(),
                "Some expense categories could not be resolved",
            );
        }

        let mut notes: HashMap<DbId, Vec<Note>> = HashMap::new();
        for note in NoteRepo::list_for_expenses(pool, &expense_ids).await? {
            notes.entry(note.expense_id).or_default().push(note);
        }

        Ok(expenses
            .into_iter()
            .map(|expense| ExpenseDetail {
                category: categories.get(&expense.category_id).cloned(),
                notes: notes.remove(&expense.id).unwrap_or_default(),
                expense,
            })
            .collect())
    }

    /// Replace description, amount, category and spent-at unconditionally.
    ///
    /// An omitted `spent_at` resets to `NOW()`. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                description = $2,
                amount = $3,
                category_id = $4,
                spent_at = COALESCE($5, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.category_id)
            .bind(input.spent_at)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update: read the row, merge, write back.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        input: PatchExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Expense>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = input.merge(&current);
        let update = format!(
            "UPDATE expenses SET
                description = $2,
                amount = $3,
                category_id = $4,
                spent_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let expense = sqlx::query_as::<_, Expense>(&update)
            .bind(id)
            .bind(&merged.description)
            .bind(merged.amount)
            .bind(merged.category_id)
            .bind(merged.spent_at.unwrap_or(current.spent_at))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(expense))
    }

    /// Delete an expense by ID, returning the removed row. Notes cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("DELETE FROM expenses WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
