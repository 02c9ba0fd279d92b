//! Cascading select state: one value per filter field, with hierarchy
//! children reset whenever their parent is set.

use crate::model::schema::{EnquirySchema, FilterField};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    #[error("'{value}' is not a valid option for {field}")]
    InvalidOption { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    fields: Vec<FilterField>,
    values: BTreeMap<&'static str, String>,
}

impl Selection {
    pub fn new(fields: &[FilterField]) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.key, field.sentinel.to_string()))
            .collect();
        Self {
            fields: fields.to_vec(),
            values,
        }
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The value of `key` unless it is the field's sentinel.
    pub fn constraint(&self, key: &str) -> Option<&str> {
        let field = self.field(key)?;
        self.get(key).filter(|value| !field.is_sentinel(value))
    }

    /// Fields currently constraining the result, as (key, value).
    pub fn active(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().filter_map(move |field| {
            self.values
                .get(field.key)
                .filter(|value| !field.is_sentinel(value))
                .map(|value| (field.key, value.as_str()))
        })
    }

    pub fn is_clear(&self) -> bool {
        self.active().next().is_none()
    }

    /// Options offered for `key` given the current parent selections.
    /// A child whose parent is unset offers nothing.
    pub fn options(&self, schema: &EnquirySchema, key: &str) -> Vec<&'static str> {
        if let Some(link) = schema.parent_link(key) {
            return match self.constraint(link.parent) {
                Some(parent) => link.children(parent).to_vec(),
                None => Vec::new(),
            };
        }
        self.field(key)
            .map(|field| field.options.clone())
            .unwrap_or_default()
    }

    /// Sets `key` and resets every descendant in the hierarchy to its sentinel.
    pub fn set(&mut self, schema: &EnquirySchema, key: &str, value: &str) -> Result<(), FilterError> {
        let field = self
            .field(key)
            .ok_or_else(|| FilterError::UnknownField(key.to_string()))?;
        let field_key = field.key;

        if !field.is_sentinel(value) && !self.options(schema, key).contains(&value) {
            return Err(FilterError::InvalidOption {
                field: key.to_string(),
                value: value.to_string(),
            });
        }

        self.values.insert(field_key, value.to_string());
        self.reset_descendants(schema, field_key);
        Ok(())
    }

    fn reset_descendants(&mut self, schema: &EnquirySchema, key: &str) {
        let mut current = key;
        // Links form a chain, so this walks parent -> child -> grandchild.
        while let Some(link) = schema.child_link(current) {
            if let Some(child) = self.fields.iter().find(|field| field.key == link.child) {
                self.values.insert(child.key, child.sentinel.to_string());
            }
            current = link.child;
        }
    }

    pub fn reset(&mut self) {
        for field in &self.fields {
            self.values.insert(field.key, field.sentinel.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::EnquiryKind;

    #[test]
    fn test_child_options_follow_parent() {
        let schema = EnquiryKind::HrdAttestation.schema();
        let mut selection = Selection::new(&schema.filters);
        assert!(selection.options(&schema, "group").is_empty());

        selection.set(&schema, "category", "Educational Documents").unwrap();
        assert_eq!(selection.options(&schema, "group"), vec!["School", "University", "Professional"]);
        assert!(selection.options(&schema, "docType").is_empty());

        selection.set(&schema, "group", "University").unwrap();
        assert!(selection.options(&schema, "docType").contains(&"Transcript"));
    }

    #[test]
    fn test_changing_parent_clears_descendants() {
        let schema = EnquiryKind::HrdAttestation.schema();
        let mut selection = Selection::new(&schema.filters);
        selection.set(&schema, "category", "Personal Documents").unwrap();
        selection.set(&schema, "group", "Civil Records").unwrap();
        selection.set(&schema, "docType", "Birth Certificate").unwrap();

        selection.set(&schema, "category", "Educational Documents").unwrap();
        assert_eq!(selection.get("group"), Some("Select Group"));
        assert_eq!(selection.get("docType"), Some("Select Document Type"));
    }

    #[test]
    fn test_child_outside_parent_options_is_rejected() {
        let schema = EnquiryKind::StickerVisa.schema();
        let mut selection = Selection::new(&schema.filters);
        selection.set(&schema, "country", "Qatar").unwrap();
        let err = selection.set(&schema, "visaType", "Umrah").unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidOption {
                field: "visaType".to_string(),
                value: "Umrah".to_string()
            }
        );
        assert_eq!(selection.get("visaType"), Some("Select Visa Type"));
    }

    #[test]
    fn test_unknown_field() {
        let schema = EnquiryKind::Pcc.schema();
        let mut selection = Selection::new(&schema.filters);
        assert_eq!(
            selection.set(&schema, "visaType", "Umrah"),
            Err(FilterError::UnknownField("visaType".to_string()))
        );
    }

    #[test]
    fn test_active_skips_sentinels() {
        let schema = EnquiryKind::Pcc.schema();
        let mut selection = Selection::new(&schema.filters);
        assert!(selection.is_clear());
        selection.set(&schema, "country", "Russia").unwrap();
        let active: Vec<_> = selection.active().collect();
        assert_eq!(active, vec![("country", "Russia")]);
        selection.reset();
        assert!(selection.is_clear());
    }
}
