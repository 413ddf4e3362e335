//! Item record and draft

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Draft;

/// A catalog item as served by the collection API.
///
/// The canonical copy lives on the server; edit sessions work on an
/// [`ItemDraft`] and never mutate a fetched record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier; opaque and immutable.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Identifier of the owning category.
    pub category: String,
    pub brand: String,
    /// Decimal string on the wire.
    pub price: Decimal,
    /// The server emits an integer, the client submits form strings; both
    /// forms deserialize here.
    #[serde(deserialize_with = "int_as_string")]
    pub quantity: String,
    /// Server-assigned, read-only.
    pub created_at: DateTime<Utc>,
    /// Server-assigned, read-only.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Seeds an editable draft mirroring this record.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            price: self.price.to_string(),
            quantity: self.quantity.clone(),
        }
    }
}

fn int_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Text(String),
    }

    Ok(match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => value.to_string(),
        IntOrString::Text(value) => value,
    })
}

/// The editable fields of an [`Item`], as form-input strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: String,
    pub quantity: String,
}

impl Draft for ItemDraft {
    const FIELDS: &'static [&'static str] =
        &["name", "description", "category", "brand", "price", "quantity"];

    const REQUIRED: &'static [&'static str] = &["name", "description"];

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "category" => Some(&self.category),
            "brand" => Some(&self.brand),
            "price" => Some(&self.price),
            "quantity" => Some(&self.quantity),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "category" => &mut self.category,
            "brand" => &mut self.brand,
            "price" => &mut self.price,
            "quantity" => &mut self.quantity,
            _ => return false,
        };
        *slot = value.to_owned();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "67a1b2c3d4e5f60718293a4b",
            "name": "Bookshelf Speakers",
            "description": "Passive two-way pair",
            "category": "66f0e1d2c3b4a59687opq123",
            "brand": "Wharfedale",
            "price": "199.99",
            "quantity": 4,
            "created_at": "2025-01-12T09:30:00Z",
            "updated_at": "2025-02-01T17:45:00Z"
        }"#
    }

    #[test]
    fn test_deserialize_server_record() {
        let item: Item = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(item.name, "Bookshelf Speakers");
        assert_eq!(item.price.to_string(), "199.99");
        assert_eq!(item.quantity, "4");
    }

    #[test]
    fn test_quantity_accepts_string_form() {
        let json = sample_json().replace("\"quantity\": 4", "\"quantity\": \"4\"");
        let item: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item.quantity, "4");
    }

    #[test]
    fn test_draft_seeded_from_record() {
        let item: Item = serde_json::from_str(sample_json()).unwrap();
        let draft = item.to_draft();
        assert_eq!(draft.price, "199.99");
        assert_eq!(draft.quantity, "4");
        assert_eq!(draft.category, item.category);
    }

    #[test]
    fn test_draft_field_surface() {
        let mut draft = ItemDraft::default();
        assert!(draft.set("brand", "Sony"));
        assert!(!draft.set("created_at", "2025-01-01"));
        assert_eq!(draft.get("brand"), Some("Sony"));
        assert_eq!(draft.get("created_at"), None);
    }

    #[test]
    fn test_missing_required() {
        let mut draft = ItemDraft::default();
        assert_eq!(draft.missing_required(), vec!["name", "description"]);
        draft.set("name", "Turntable");
        assert_eq!(draft.missing_required(), vec!["description"]);
        draft.set("description", "  ");
        assert_eq!(draft.missing_required(), vec!["description"]);
    }

    #[test]
    fn test_draft_serializes_form_strings() {
        let item: Item = serde_json::from_str(sample_json()).unwrap();
        let body = serde_json::to_value(item.to_draft()).unwrap();
        assert_eq!(body["price"], "199.99");
        assert_eq!(body["quantity"], "4");
        assert!(body.get("id").is_none());
        assert!(body.get("created_at").is_none());
    }
}
