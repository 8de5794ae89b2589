//! Expense note model and DTO.

use serde::{Deserialize, Serialize};
use spendlog_core::types::{DbId, NoteId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `expense_notes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(skip_serializing)]
    pub expense_id: DbId,
    pub text: String,
    pub inserted_at: Timestamp,
}

/// DTO for attaching a note to an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[serde(default)]
    #[validate(length(min = 1, max = 4000, message = "must be between 1 and 4000 characters"))]
    pub text: String,
}
