#![allow(dead_code)]

use indexmap::IndexMap;
use serde::Serialize;

use crate::form::{is_multi_value, FormData};

/// A single payload value: plain text, or the split list of a multi-value field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// The JSON object posted to `/generate`.
///
/// Blank fields are absent rather than null. Keys serialize in the order the
/// form first produced them; a repeated name overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload {
    fields: IndexMap<String, FieldValue>,
}

impl Payload {
    pub fn from_form(form: &FormData) -> Self {
        let mut fields = IndexMap::new();

        for (name, value) in form.iter() {
            if value.trim().is_empty() {
                continue;
            }

            let value = if is_multi_value(name) {
                FieldValue::List(split_multi_value(value))
            } else {
                FieldValue::Text(value.to_string())
            };
            fields.insert(name.to_string(), value);
        }

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Splits a comma-separated value into trimmed, non-empty items.
pub fn split_multi_value(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_split_trims_items() {
        assert_eq!(split_multi_value("Python, Go ,  Rust"), vec!["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_split_drops_empty_items() {
        assert_eq!(split_multi_value("Python,,Go"), vec!["Python", "Go"]);
        assert!(split_multi_value(" , ,").is_empty());
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let form: FormData = [("name", "Ada"), ("phone", "   "), ("summary", ""), ("skills", "\t")]
            .into_iter()
            .collect();
        let payload = Payload::from_form(&form);

        assert_eq!(payload.len(), 1);
        assert!(!payload.contains("phone"));
        assert!(!payload.contains("summary"));
        assert!(!payload.contains("skills"));
    }

    #[test]
    fn test_multi_value_fields_become_lists() {
        let form: FormData = [("skills", "Python, Go ,  Rust"), ("languages", "English,,French")]
            .into_iter()
            .collect();
        let payload = Payload::from_form(&form);

        assert_eq!(payload.get("skills"), Some(&list(&["Python", "Go", "Rust"])));
        assert_eq!(payload.get("languages"), Some(&list(&["English", "French"])));
    }

    #[test]
    fn test_separator_only_multi_value_is_empty_list() {
        let form: FormData = [("skills", " , ")].into_iter().collect();
        assert_eq!(Payload::from_form(&form).get("skills"), Some(&list(&[])));
    }

    #[test]
    fn test_scalar_values_are_not_trimmed() {
        let form: FormData = [("summary", "  Builds compilers  ")].into_iter().collect();
        assert_eq!(
            Payload::from_form(&form).get("summary"),
            Some(&FieldValue::Text("  Builds compilers  ".to_string()))
        );
    }

    #[test]
    fn test_repeated_name_overwrites_in_place() {
        let form: FormData = [("name", "Ada"), ("email", "a@b.c"), ("name", "Grace")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&Payload::from_form(&form)).unwrap();
        assert_eq!(json, r#"{"name":"Grace","email":"a@b.c"}"#);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let form: FormData = [("name", "Ada"), ("skills", "Rust, SQL")].into_iter().collect();
        let value = serde_json::to_value(Payload::from_form(&form)).unwrap();
        assert_eq!(value, json!({"name": "Ada", "skills": ["Rust", "SQL"]}));
    }
}
