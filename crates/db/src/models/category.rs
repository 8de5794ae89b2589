//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use spendlog_core::patch::{blank_as_none, merge, merge_nullable};
use spendlog_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A category row from the `categories` table.
///
/// `sort_order` is exposed on the wire as `order`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub sort_order: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
///
/// A missing `name` deserializes as empty and fails validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    pub order: Option<i32>,
}

/// DTO for replacing every mutable field of a category.
///
/// `order` is written as given, so omitting it clears the stored value.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct UpdateCategory {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    pub order: Option<i32>,
}

/// DTO for a partial category update.
///
/// Absent, `null` and `""` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchCategory {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub order: Option<i32>,
}

impl PatchCategory {
    /// Fold this patch over the stored row, producing a full replacement.
    pub fn merge(self, current: &Category) -> UpdateCategory {
        UpdateCategory {
            name: merge(self.name, current.name.clone()),
            order: merge_nullable(self.order, current.sort_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use validator::Validate;

    use super::*;

    fn stored() -> Category {
        Category {
            id: spendlog_core::types::new_id(),
            name: "Transporte".into(),
            sort_order: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn patch(json: &str) -> PatchCategory {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let merged = patch(r#"{"name": "", "order": ""}"#).merge(&stored());
        assert_eq!(
            merged,
            UpdateCategory {
                name: "Transporte".into(),
                order: Some(1),
            }
        );
    }

    #[test]
    fn patch_overwrites_only_supplied_field() {
        let merged = patch(r#"{"order": 5}"#).merge(&stored());
        assert_eq!(merged.name, "Transporte");
        assert_eq!(merged.order, Some(5));

        let merged = patch(r#"{"name": "Lazer"}"#).merge(&stored());
        assert_eq!(merged.name, "Lazer");
        assert_eq!(merged.order, Some(1));
    }

    #[test]
    fn create_requires_non_empty_name() {
        let input: CreateCategory = serde_json::from_str(r#"{"order": 2}"#).unwrap();
        assert!(input.validate().is_err());

        let input: CreateCategory = serde_json::from_str(r#"{"name": "Mercado"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.order, None);
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(101);
        let input = UpdateCategory {
            name: long.clone(),
            order: None,
        };
        assert!(input.validate().is_err());

        let p = PatchCategory {
            name: Some(long),
            order: None,
        };
        assert!(p.validate().is_err());
    }
}
