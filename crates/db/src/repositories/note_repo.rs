//! Repository for the `expense_notes` table.

use spendlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note};

/// Column list for expense_notes queries.
const COLUMNS: &str = "id, expense_id, text, inserted_at";

/// Provides insert and lookup operations for expense notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Attach a note to an expense.
    ///
    /// Fails on `fk_expense_notes_expense` if the expense does not exist.
    pub async fn create(
        pool: &PgPool,
        expense_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO expense_notes (expense_id, text)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(expense_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// List the notes of one expense, oldest first.
    pub async fn list_for_expense(
        pool: &PgPool,
        expense_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM expense_notes WHERE expense_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Note>(&query)
            .bind(expense_id)
            .fetch_all(pool)
            .await
    }

    /// List the notes of several expenses at once, oldest first.
    pub async fn list_for_expenses(
        pool: &PgPool,
        expense_ids: &[DbId],
    ) -> Result<Vec<Note>, sqlx::Error> {
        if expense_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM expense_notes WHERE expense_id = ANY($1) ORDER BY id ASC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(expense_ids)
            .fetch_all(pool)
            .await
    }
}
