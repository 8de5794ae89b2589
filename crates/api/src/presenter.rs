//! Wire views for categories, expenses and notes.
//!
//! Pure mapping from stored rows to the JSON shapes returned by handlers.
//! Expense timestamps are rendered in the configured display offset as
//! `YYYY-MM-DD HH:MM:SS`; note timestamps are passed through untouched.

use chrono::FixedOffset;
use serde::Serialize;
use spendlog_core::timestamp::format_display;
use spendlog_core::types::DbId;
use spendlog_db::models::category::Category;
use spendlog_db::models::expense::ExpenseDetail;
use spendlog_db::models::note::Note;

/// Confirmation message returned after deleting a category.
pub const CATEGORY_REMOVED: &str = "Category removed";

/// Confirmation message returned after deleting an expense.
pub const EXPENSE_REMOVED: &str = "Expense removed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: DbId,
    pub name: String,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListView {
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDeletedView {
    pub id: DbId,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseView {
    pub id: DbId,
    pub description: String,
    pub amount: f64,
    pub inserted_at: String,
    pub spent_at: String,
    /// `null` when the category cannot be resolved.
    pub category: Option<CategoryView>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseListView {
    pub expenses: Vec<ExpenseView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDeletedView {
    pub id: DbId,
    pub description: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteListView {
    pub notes: Vec<Note>,
}

pub fn present_category(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name.clone(),
        order: category.sort_order,
    }
}

pub fn present_categories(categories: &[Category]) -> CategoryListView {
    CategoryListView {
        categories: categories.iter().map(present_category).collect(),
    }
}

pub fn present_category_deleted(category: &Category) -> CategoryDeletedView {
    CategoryDeletedView {
        id: category.id,
        name: category.name.clone(),
        message: CATEGORY_REMOVED.to_string(),
    }
}

pub fn present_expense(detail: &ExpenseDetail, offset: &FixedOffset) -> ExpenseView {
    let expense = &detail.expense;
    ExpenseView {
        id: expense.id,
        description: expense.description.clone(),
        amount: expense.amount,
        inserted_at: format_display(&expense.inserted_at, offset),
        spent_at: format_display(&expense.spent_at, offset),
        category: detail.category.as_ref().map(present_category),
        notes: detail.notes.clone(),
    }
}

pub fn present_expenses(details: &[ExpenseDetail], offset: &FixedOffset) -> ExpenseListView {
    ExpenseListView {
        expenses: details.iter().map(|d| present_expense(d, offset)).collect(),
    }
}

pub fn present_expense_deleted(id: DbId, description: &str) -> ExpenseDeletedView {
    ExpenseDeletedView {
        id,
        description: description.to_string(),
        message: EXPENSE_REMOVED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use spendlog_core::timestamp::display_offset;
    use spendlog_core::types::new_id;
    use spendlog_db::models::expense::Expense;

    use super::*;

    fn category(name: &str, order: Option<i32>) -> Category {
        Category {
            id: new_id(),
            name: name.into(),
            sort_order: order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn detail(category: Option<Category>, notes: Vec<Note>) -> ExpenseDetail {
        let at = Utc.with_ymd_and_hms(2025, 9, 28, 14, 48, 0).unwrap();
        ExpenseDetail {
            expense: Expense {
                id: new_id(),
                description: "Emergencia falta de gas".into(),
                amount: 120.0,
                category_id: category.as_ref().map(|c| c.id).unwrap_or_else(new_id),
                inserted_at: at,
                spent_at: at,
                created_at: at,
                updated_at: at,
            },
            category,
            notes,
        }
    }

    #[test]
    fn category_view_has_id_name_order() {
        let c = category("Transporte", Some(1));
        let json = serde_json::to_value(present_category(&c)).unwrap();
        assert_eq!(
            json,
            json!({"id": c.id.to_string(), "name": "Transporte", "order": 1})
        );
    }

    #[test]
    fn category_without_order_serializes_null() {
        let json = serde_json::to_value(present_category(&category("Lazer", None))).unwrap();
        assert!(json["order"].is_null());
    }

    #[test]
    fn category_list_wraps_items() {
        let list = present_categories(&[category("A", None), category("B", Some(2))]);
        assert_eq!(list.categories.len(), 2);
        assert_eq!(list.categories[1].name, "B");

        let empty = serde_json::to_value(present_categories(&[])).unwrap();
        assert_eq!(empty, json!({"categories": []}));
    }

    #[test]
    fn expense_timestamps_shift_by_display_offset() {
        let offset = display_offset(-3).unwrap();
        let view = present_expense(&detail(Some(category("Casa", None)), vec![]), &offset);
        assert_eq!(view.inserted_at, "2025-09-28 11:48:00");
        assert_eq!(view.spent_at, "2025-09-28 11:48:00");
    }

    #[test]
    fn expense_view_nests_category_and_notes() {
        let offset = display_offset(-3).unwrap();
        let c = category("Casa", Some(3));
        let d = detail(Some(c.clone()), vec![]);
        let note = Note {
            id: 1,
            expense_id: d.expense.id,
            text: "botijao".into(),
            inserted_at: Utc.with_ymd_and_hms(2025, 9, 28, 15, 0, 0).unwrap(),
        };
        let d = ExpenseDetail {
            notes: vec![note],
            ..d
        };

        let json = serde_json::to_value(present_expense(&d, &offset)).unwrap();
        assert_eq!(json["description"], "Emergencia falta de gas");
        assert_eq!(json["amount"], 120.0);
        assert_eq!(json["category"]["id"], c.id.to_string());
        assert_eq!(json["category"]["order"], 3);
        assert_eq!(json["notes"][0]["text"], "botijao");
        assert_eq!(json["notes"][0]["id"], 1);
        assert!(json["notes"][0].get("expense_id").is_none());
    }

    #[test]
    fn unresolved_category_is_null() {
        let offset = display_offset(0).unwrap();
        let json = serde_json::to_value(present_expense(&detail(None, vec![]), &offset)).unwrap();
        assert!(json["category"].is_null());
        assert_eq!(json["notes"], json!([]));
    }

    #[test]
    fn deleted_views_carry_confirmation() {
        let c = category("Velha", None);
        let view = present_category_deleted(&c);
        assert_eq!(view.name, "Velha");
        assert_eq!(view.message, CATEGORY_REMOVED);

        let id = new_id();
        let view = present_expense_deleted(id, "Taxi");
        assert_eq!(view.id, id);
        assert_eq!(view.message, EXPENSE_REMOVED);
    }
}
