//! Field validation error map

use std::collections::BTreeMap;

use serde_json::Value;

/// Keys the API uses for single-message bodies rather than field maps.
const MESSAGE_KEYS: [&str; 3] = ["error", "message", "detail"];

/// Field-keyed validation failures reported by the collection API.
///
/// Maps a field name to one or more human-readable messages. The client-side
/// required-field checks on creation produce the same shape, so views render
/// both uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Key used for failures that are not tied to a specific field.
    pub const NON_FIELD: &'static str = "non_field_errors";

    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding a single non-field message.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(Self::NON_FIELD, message);
        errors
    }

    /// Parses a non-success response body into a field map.
    ///
    /// Returns `None` when the body is not a `field -> message(s)` object —
    /// including the API's `{"error"|"message"|"detail": "..."}` bodies,
    /// which are opaque messages, not validation maps.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let map = value.as_object()?;
        if map.is_empty() {
            return None;
        }
        if map.len() == 1 && map.keys().all(|key| MESSAGE_KEYS.contains(&key.as_str())) {
            return None;
        }

        let mut fields = BTreeMap::new();
        for (field, messages) in map {
            let messages = match messages {
                Value::String(message) => vec![message.clone()],
                Value::Array(entries) => entries
                    .iter()
                    .map(|entry| entry.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()?,
                _ => return None,
            };
            if messages.is_empty() {
                return None;
            }
            fields.insert(field.clone(), messages);
        }
        Some(Self { fields })
    }

    /// Extracts the single opaque message from bodies shaped like
    /// `{"error": "..."}`.
    pub fn opaque_message(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        let map = value.as_object()?;
        MESSAGE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str).map(str::to_owned))
    }

    /// Adds a message for `field`.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Returns the messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Returns `true` if any message was recorded for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Returns the messages for `field` joined into one display string.
    pub fn joined(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(|messages| messages.join(", "))
    }

    /// Aggregates every field into a `field: messages` line per field.
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns `true` when no errors are recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_body() {
        let errors = ValidationErrors::from_body(
            r#"{"name":["This field may not be blank."],"price":["A valid number is required.","Ensure the value is positive."]}"#,
        )
        .unwrap();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("name").unwrap(),
            &["This field may not be blank.".to_string()]
        );
        assert_eq!(
            errors.joined("price").unwrap(),
            "A valid number is required., Ensure the value is positive."
        );
    }

    #[test]
    fn test_single_string_values() {
        let errors = ValidationErrors::from_body(r#"{"name":"already taken","brand":"unknown"}"#).unwrap();
        assert_eq!(errors.get("name").unwrap(), &["already taken".to_string()]);
        assert_eq!(errors.get("brand").unwrap(), &["unknown".to_string()]);
    }

    #[test]
    fn test_message_bodies_are_opaque() {
        assert!(ValidationErrors::from_body(r#"{"error":"Product not found"}"#).is_none());
        assert!(ValidationErrors::from_body(r#"{"message":"Failed to delete category."}"#).is_none());
        assert!(ValidationErrors::from_body(r#"{"detail":"Not found."}"#).is_none());
        assert_eq!(
            ValidationErrors::opaque_message(r#"{"error":"Product not found"}"#).unwrap(),
            "Product not found"
        );
    }

    #[test]
    fn test_unparseable_bodies() {
        assert!(ValidationErrors::from_body("").is_none());
        assert!(ValidationErrors::from_body("<html>502</html>").is_none());
        assert!(ValidationErrors::from_body(r#"{"count":3}"#).is_none());
        assert!(ValidationErrors::from_body(r#"{}"#).is_none());
    }

    #[test]
    fn test_summary_aggregates_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert("description", "This field is required.");
        errors.insert("name", "This field may not be blank.");
        errors.insert("name", "Ensure this field has at most 100 characters.");

        assert_eq!(
            errors.summary(),
            "description: This field is required.\nname: This field may not be blank., Ensure this field has at most 100 characters."
        );
    }

    #[test]
    fn test_non_field_shape() {
        let errors = ValidationErrors::non_field("Network error");
        assert!(errors.contains(ValidationErrors::NON_FIELD));
        assert_eq!(errors.len(), 1);
    }
}
