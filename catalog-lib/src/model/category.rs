//! Category record and draft

use serde::Deserialize;
use serde::Serialize;

use super::Draft;

/// A grouping category as served by the collection API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier; opaque and immutable.
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    /// Seeds an editable draft mirroring this record.
    pub fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// The editable fields of a [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    const FIELDS: &'static [&'static str] = &["name", "description"];

    const REQUIRED: &'static [&'static str] = &["name", "description"];

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value.to_owned();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_draft() {
        let category = Category {
            id: "66f0e1d2".into(),
            name: "Audio".into(),
            description: "Speakers and amplifiers".into(),
        };

        let mut draft = category.to_draft();
        assert_eq!(draft.get("name"), Some("Audio"));
        assert!(draft.set("description", "Hi-fi gear"));
        assert_eq!(draft.description, "Hi-fi gear");
    }

    #[test]
    fn test_both_fields_required() {
        let draft = CategoryDraft::default();
        assert_eq!(draft.missing_required(), vec!["name", "description"]);
    }
}
