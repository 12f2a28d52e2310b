//! Tracker custom field metadata

use serde::{Deserialize, Serialize};

/// One selectable option on a single-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

/// Declared type of a tracker custom field.
///
/// A closed set: each variant dictates the shape of the field-value mutation
/// payload, so an expected field reporting any other data type is rejected
/// up front instead of producing a mutation the tracker would refuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    SingleSelect { options: Vec<SelectOption> },
}

/// Resolved metadata for one custom field on the tracker project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Options of a single-select field; empty for every other kind.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::SingleSelect { options } => options,
            _ => &[],
        }
    }

    /// Find an option by exact name.
    pub fn option_named(&self, name: &str) -> Option<&SelectOption> {
        self.options().iter().find(|option| option.name == name)
    }

    /// Find the first option whose name contains `needle`.
    pub fn option_containing(&self, needle: &str) -> Option<&SelectOption> {
        self.options().iter().find(|option| option.name.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_field() -> FieldDescriptor {
        FieldDescriptor {
            id: "F1".into(),
            name: "Status".into(),
            kind: FieldKind::SingleSelect {
                options: vec![
                    SelectOption { id: "o1".into(), name: "รออนุมัติ".into() },
                    SelectOption { id: "o2".into(), name: "✅ อนุมัติแล้ว".into() },
                ],
            },
        }
    }

    #[test]
    fn option_lookup_by_substring() {
        let field = status_field();
        assert_eq!(field.option_containing("อนุมัติแล้ว").map(|o| o.id.as_str()), Some("o2"));
        assert!(field.option_containing("ไม่อนุมัติ").is_none());
    }

    #[test]
    fn option_lookup_exact() {
        let field = status_field();
        assert!(field.option_named("รออนุมัติ").is_some());
        assert!(field.option_named("อนุมัติแล้ว").is_none());
    }

    #[test]
    fn non_select_fields_have_no_options() {
        let field =
            FieldDescriptor { id: "F2".into(), name: "คะแนน".into(), kind: FieldKind::Number };
        assert!(field.options().is_empty());
        assert!(field.option_containing("อะไรก็ได้").is_none());
    }
}
