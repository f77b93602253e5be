//! Form-encoded body sent with a start request.

use super::resolver::{FieldInput, ResolvedField};

/// A submitted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    /// A single value.
    Text(String),
    /// A multi-selection; encoded as one key/value pair per item.
    Many(Vec<String>),
}

impl From<&FieldInput> for PayloadValue {
    fn from(input: &FieldInput) -> Self {
        match input {
            FieldInput::Text(s) | FieldInput::Secret(s) => Self::Text(s.clone()),
            FieldInput::Checkbox(b) => Self::Text(b.to_string()),
            FieldInput::Select { options, selected } => Self::Text(
                selected
                    .and_then(|i| options.get(i))
                    .cloned()
                    .unwrap_or_default(),
            ),
            FieldInput::MultiSelect { options, selected } => Self::Many(
                options
                    .iter()
                    .zip(selected)
                    .filter(|(_, on)| **on)
                    .map(|(name, _)| name.clone())
                    .collect(),
            ),
        }
    }
}

/// The form values sent with a start request, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionPayload {
    entries: Vec<(String, PayloadValue)>,
}

impl SubmissionPayload {
    /// Collects the current value of every field.
    ///
    /// Disabled fields are included as displayed.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a ResolvedField>) -> Self {
        let entries = fields
            .into_iter()
            .map(|f| (f.name.clone(), PayloadValue::from(&f.input)))
            .collect();
        Self { entries }
    }

    /// Sets `name` to `value`, replacing any existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: PayloadValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `name` is part of the payload.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens the payload into key/value pairs as a browser form would.
    ///
    /// A multi-selection contributes one pair per selected item and nothing
    /// when empty.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                PayloadValue::Text(v) => pairs.push((key.as_str(), v.as_str())),
                PayloadValue::Many(items) => {
                    pairs.extend(items.iter().map(|v| (key.as_str(), v.as_str())));
                }
            }
        }
        pairs
    }

    /// Encodes the payload as `application/x-www-form-urlencoded`.
    pub fn to_form_body(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self.pairs())
    }
}
