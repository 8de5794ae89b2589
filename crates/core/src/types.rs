use uuid::Uuid;

use crate::error::CoreError;

/// Category and expense primary keys are application-generated UUID v4.
pub type DbId = Uuid;

/// Expense notes use a BIGSERIAL key.
pub type NoteId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh random identifier for a new category or expense.
pub fn new_id() -> DbId {
    Uuid::new_v4()
}

/// Parse a raw path segment into a [`DbId`].
///
/// Runs before any lookup so a missing or malformed identifier is reported
/// as a validation failure rather than a not-found.
pub fn parse_id(raw: &str, entity: &str) -> Result<DbId, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation(format!("{entity} id is required")));
    }
    Uuid::parse_str(raw)
        .map_err(|_| CoreError::Validation(format!("{entity} id '{raw}' is not a valid UUID")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_ids_are_unique_v4() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn parses_hyphenated_uuid() {
        let id = new_id();
        assert_eq!(parse_id(&id.to_string(), "Category").unwrap(), id);
    }

    #[test]
    fn empty_id_is_validation_error() {
        assert_matches!(
            parse_id("  ", "Category"),
            Err(CoreError::Validation(msg)) if msg == "Category id is required"
        );
    }

    #[test]
    fn malformed_id_is_validation_error() {
        assert_matches!(parse_id("42", "Expense"), Err(CoreError::Validation(_)));
    }
}
