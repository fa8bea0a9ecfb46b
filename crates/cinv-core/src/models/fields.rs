//! Scalar field lookups: the label/key registry shared by a whole batch and
//! the per-document value map produced by each scan.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LookupError};

/// Intended interpretation of a scalar value. Advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    Text,
    Number,
    Date,
}

/// A label to find on a line of text, and the key its value is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldItem {
    key: String,
    label: String,
    kind: ValueKind,
}

impl FieldItem {
    /// Create a new item, validating the key.
    ///
    /// Keys must be lowercase and contain no whitespace.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: ValueKind,
    ) -> Result<Self, ConfigError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(ConfigError::InvalidKey(key));
        }

        Ok(Self {
            key,
            label: label.into(),
            kind,
        })
    }

    /// Create a text-valued item.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(key, label, ValueKind::Text)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.chars().any(|c| c.is_uppercase() || c.is_whitespace())
        && key.chars().any(|c| c.is_lowercase())
}

/// Record columns that scalar keys may not shadow.
pub const RESERVED_KEYS: [&str; 2] = ["filename", "oracle-so#"];

/// Ordered collection of field items with unique keys.
///
/// The registry only describes what to look for. Extracted values live in a
/// [`ScalarValues`] created fresh for each document, so one registry can be
/// shared by any number of documents being processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldRegistry {
    items: Vec<FieldItem>,
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from items, rejecting duplicate keys.
    pub fn from_items(items: impl IntoIterator<Item = FieldItem>) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for item in items {
            registry.add(item)?;
        }
        Ok(registry)
    }

    /// Append an item. Fails if its key is already registered or names a
    /// column every record carries.
    pub fn add(&mut self, item: FieldItem) -> Result<(), ConfigError> {
        if RESERVED_KEYS.contains(&item.key()) {
            return Err(ConfigError::ReservedKey(item.key));
        }
        if self.contains(item.key()) {
            return Err(ConfigError::DuplicateKey(item.key));
        }
        self.items.push(item);
        Ok(())
    }

    /// Get an item by key.
    pub fn get(&self, key: &str) -> Result<&FieldItem, LookupError> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .ok_or_else(|| LookupError::new(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key == key)
    }

    /// All labels, in registration order.
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }

    /// All keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    pub fn items(&self) -> &[FieldItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create an empty value map with one null slot per registered key.
    pub fn empty_values(&self) -> ScalarValues {
        ScalarValues {
            entries: self.keys().map(|key| (key.to_string(), None)).collect(),
        }
    }
}

/// Per-document scalar results, keyed and ordered like the registry that
/// created them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarValues {
    entries: Vec<(String, Option<String>)>,
}

impl ScalarValues {
    /// Update the value stored under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), LookupError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .ok_or_else(|| LookupError::new(key))?;
        slot.1 = Some(value.into());
        Ok(())
    }

    /// Value stored under `key`; `None` when the key is unknown or unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Null every value, keeping the keys.
    pub fn reset(&mut self) {
        for (_, value) in &mut self.entries {
            *value = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
