//! Expense entity model and DTOs.

use serde::{Deserialize, Serialize};
use spendlog_core::patch::{blank_as_none, merge};
use spendlog_core::timestamp::deserialize_lenient;
use spendlog_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::Category;
use crate::models::note::Note;

/// An expense row from the `expenses` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub description: String,
    pub amount: f64,
    pub category_id: DbId,
    pub inserted_at: Timestamp,
    pub spent_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An expense together with its resolved category and attached notes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDetail {
    pub expense: Expense,
    /// `None` when the referenced category cannot be resolved.
    pub category: Option<Category>,
    /// Ordered by insertion.
    pub notes: Vec<Note>,
}

/// DTO for creating a new expense.
///
/// `spent_at` and `inserted_at` default to the insertion time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    #[validate(length(max = 140, message = "must be at most 140 characters"))]
    pub description: String,
    pub amount: f64,
    pub category_id: DbId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub spent_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub inserted_at: Option<Timestamp>,
}

/// DTO for replacing every mutable field of an expense.
///
/// An omitted `spent_at` resets it to the current time.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct UpdateExpense {
    #[validate(length(max = 140, message = "must be at most 140 characters"))]
    pub description: String,
    pub amount: f64,
    pub category_id: DbId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub spent_at: Option<Timestamp>,
}

/// DTO for a partial expense update.
///
/// Absent, `null` and `""` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchExpense {
    #[validate(length(max = 140, message = "must be at most 140 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<DbId>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub spent_at: Option<Timestamp>,
}

impl PatchExpense {
    /// Fold this patch over the stored row, producing a full replacement.
    pub fn merge(self, current: &Expense) -> UpdateExpense {
        UpdateExpense {
            description: merge(self.description, current.description.clone()),
            amount: merge(self.amount, current.amount),
            category_id: merge(self.category_id, current.category_id),
            spent_at: Some(merge(self.spent_at, current.spent_at)),
        }
    }
}
