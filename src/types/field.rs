use serde::{Deserialize, Serialize};

/// Input kind of a form field. Only [`FieldType::Checkbox`] changes how rules
/// evaluate; the rest are carried for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Tel,
    Url,
    Password,
    Textarea,
    Select,
    MultiSelect,
    Radio,
    Checkbox,
    Date,
    Time,
    Datetime,
    File,
    Hidden,
    Rating,
    Signature,
    #[serde(other)]
    Other,
}

/// A field definition as supplied by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    #[must_use]
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            field_type,
            required: false,
        }
    }

    /// Mark the field as statically required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
