//! Recognition of PostgreSQL constraint failures.
//!
//! Conflicts and broken references are detected from the storage error
//! rather than by pre-checking, so callers match on the constraint name.

/// Unique constraint on `categories.name`.
pub const UQ_CATEGORIES_NAME: &str = "uq_categories_name";

/// Foreign key from `expenses.category_id` to `categories.id`.
pub const FK_EXPENSES_CATEGORY: &str = "fk_expenses_category";

/// Foreign key from `expense_notes.expense_id` to `expenses.id`.
pub const FK_EXPENSE_NOTES_EXPENSE: &str = "fk_expense_notes_expense";

/// A constraint failure reported by the database, with the constraint name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// SQLSTATE 23505.
    Unique(String),
    /// SQLSTATE 23503.
    ForeignKey(String),
    /// SQLSTATE 23514.
    Check(String),
}

/// Classify a sqlx error as a constraint violation, if it is one.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let constraint = db_err.constraint().unwrap_or("unknown").to_string();
    match db_err.code().as_deref() {
        Some("23505") => Some(ConstraintViolation::Unique(constraint)),
        Some("23503") => Some(ConstraintViolation::ForeignKey(constraint)),
        Some("23514") => Some(ConstraintViolation::Check(constraint)),
        _ => None,
    }
}

/// `true` if `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(
        constraint_violation(err),
        Some(ConstraintViolation::Unique(name)) if name == constraint
    )
}

/// `true` if `err` is a foreign-key violation on the named constraint.
pub fn is_foreign_key_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(
        constraint_violation(err),
        Some(ConstraintViolation::ForeignKey(name)) if name == constraint
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_violations() {
        assert_eq!(constraint_violation(&sqlx::Error::RowNotFound), None);
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound, UQ_CATEGORIES_NAME));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut, FK_EXPENSES_CATEGORY));
    }
}
