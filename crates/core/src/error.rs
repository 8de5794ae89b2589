use validator::ValidationErrors;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Flatten DTO validation failures into a single `field: reason` message.
///
/// Fields are sorted so the message is stable across runs.
impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut reasons: Vec<String> = field_errors
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        reasons.sort();
        CoreError::Validation(reasons.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(length(max = 3))]
        code: String,
    }

    #[test]
    fn validation_errors_become_sorted_message() {
        let sample = Sample {
            name: String::new(),
            code: "ABCD".into(),
        };
        let err: CoreError = sample.validate().unwrap_err().into();
        match err {
            CoreError::Validation(msg) => assert_eq!(msg, "code: length; name: must not be empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
