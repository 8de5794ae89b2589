//! Partial-update helpers.
//!
//! PATCH payloads treat a missing field, JSON `null`, and the empty string
//! the same way: the stored value is left unchanged. Text fields arrive as
//! `Some("")` and are filtered by [`provided`]; typed fields (numbers, ids)
//! accept `""` on the wire through [`blank_as_none`].

use serde::de::{self, Deserialize, Deserializer};
use uuid::Uuid;

use crate::types::Timestamp;

/// A value that may be "blank" and therefore count as not supplied.
pub trait Blank {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for i32 {}
impl Blank for f64 {}
impl Blank for Uuid {}
impl Blank for Timestamp {}

/// Keep a patch value only if it is present and not blank.
pub fn provided<T: Blank>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.is_blank())
}

/// Apply a patch value over the current one.
pub fn merge<T: Blank>(patch: Option<T>, current: T) -> T {
    provided(patch).unwrap_or(current)
}

/// Apply a patch value over a nullable current value.
///
/// A blank or absent patch never clears the stored value.
pub fn merge_nullable<T: Blank>(patch: Option<T>, current: Option<T>) -> Option<T> {
    provided(patch).or(current)
}

/// Deserialize an optional typed field where `""` means "not supplied".
///
/// Use with `#[serde(default, deserialize_with = "blank_as_none")]`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum ValueOrText<T> {
        Value(T),
        Text(String),
    }

    match Option::<ValueOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ValueOrText::Value(value)) => Ok(Some(value)),
        Some(ValueOrText::Text(text)) if text.is_empty() => Ok(None),
        Some(ValueOrText::Text(text)) => Err(de::Error::custom(format!(
            "unexpected value \"{text}\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "blank_as_none")]
        order: Option<i32>,
        #[serde(default, deserialize_with = "blank_as_none")]
        category_id: Option<Uuid>,
        name: Option<String>,
    }

    fn parse(json: &str) -> Result<Patch, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn empty_string_is_not_provided() {
        assert_eq!(provided(Some(String::new())), None);
        assert_eq!(provided(Some("Food".to_string())), Some("Food".to_string()));
        assert_eq!(provided::<String>(None), None);
    }

    #[test]
    fn merge_keeps_current_for_blank_patch() {
        assert_eq!(merge(Some(String::new()), "Food".to_string()), "Food");
        assert_eq!(merge(Some("Rent".to_string()), "Food".to_string()), "Rent");
        assert_eq!(merge(None, 12.5), 12.5);
    }

    #[test]
    fn merge_nullable_never_clears() {
        assert_eq!(merge_nullable(None, Some(3)), Some(3));
        assert_eq!(merge_nullable(Some(7), None), Some(7));
        assert_eq!(merge_nullable::<i32>(None, None), None);
    }

    #[test]
    fn absent_null_and_blank_typed_fields_deserialize_to_none() {
        let absent = parse("{}").unwrap();
        assert!(absent.order.is_none() && absent.category_id.is_none());

        let null = parse(r#"{"order": null, "category_id": null}"#).unwrap();
        assert!(null.order.is_none() && null.category_id.is_none());

        let blank = parse(r#"{"order": "", "category_id": ""}"#).unwrap();
        assert!(blank.order.is_none() && blank.category_id.is_none());
    }

    #[test]
    fn typed_values_pass_through() {
        let id = Uuid::new_v4();
        let patch =
            parse(&format!(r#"{{"order": 4, "category_id": "{id}", "name": ""}}"#)).unwrap();
        assert_eq!(patch.order, Some(4));
        assert_eq!(patch.category_id, Some(id));
        assert_eq!(provided(patch.name), None);
    }

    #[test]
    fn non_blank_wrong_type_is_rejected() {
        assert!(parse(r#"{"order": "four"}"#).is_err());
        assert!(parse(r#"{"category_id": "not-a-uuid"}"#).is_err());
    }
}
