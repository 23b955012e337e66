use std::collections::HashMap;

use super::field::{FieldType, FormField};

/// Maps field ids to their definitions for constant-time lookups.
///
/// Built once per evaluation or validation call from the caller's field list.
/// Later definitions of a duplicate id replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex<'a> {
    fields: HashMap<&'a str, &'a FormField>,
}

impl<'a> FieldIndex<'a> {
    #[must_use]
    pub fn new(fields: &'a [FormField]) -> Self {
        Self {
            fields: fields.iter().map(|f| (f.id.as_str(), f)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a FormField> {
        self.fields.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// The declared type of a field, if it is known.
    #[must_use]
    pub fn field_type(&self, id: &str) -> Option<FieldType> {
        self.get(id).map(|f| f.field_type)
    }

    /// The number of distinct field ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
