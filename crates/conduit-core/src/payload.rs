//! Lenient field access for service replies.

use serde_json::Value;

/// Text of a scalar field. Numbers are rendered as text; any other kind of
/// value, or a missing field, yields `None`.
#[must_use]
pub fn text_field(payload: &Value, field: &str) -> Option<String> {
    match payload.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strings_and_numbers_are_text() {
        let payload = json!({"id": "art_1", "count": 7});

        assert_eq!(text_field(&payload, "id").as_deref(), Some("art_1"));
        assert_eq!(text_field(&payload, "count").as_deref(), Some("7"));
    }

    #[test]
    fn other_kinds_are_ignored() {
        let payload = json!({"id": null, "tags": ["a"], "meta": {}});

        assert_eq!(text_field(&payload, "id"), None);
        assert_eq!(text_field(&payload, "tags"), None);
        assert_eq!(text_field(&payload, "meta"), None);
        assert_eq!(text_field(&payload, "missing"), None);
        assert_eq!(text_field(&json!([1, 2]), "id"), None);
    }
}
