//! Raw form input and the validated submission record

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decoded form fields, keyed by name
///
/// Every field holds its values in submission order. Single-valued fields
/// are read through [`RawForm::get`], repeated ones through
/// [`RawForm::get_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: HashMap<String, Vec<String>>,
}

impl RawForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// First value submitted for a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values submitted for a field, empty when absent
    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<K, V> FromIterator<(K, V)> for RawForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        form.extend(iter);
        form
    }
}

impl<K, V> Extend<(K, V)> for RawForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// A submission whose age has been parsed
///
/// Built by [`crate::FormValidator`] once the age has parsed. Every other
/// field is passed through as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub role: String,
    pub recommend: String,
    pub improvements: Vec<String>,
    pub comments: String,
}

impl ValidatedSubmission {
    /// Encode as a JSON document
    pub fn to_json(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
