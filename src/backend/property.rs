//! Property model
//!
//! In-memory form of a namespace snapshot, used by export/import.
//!
//! ## Document Format
//! ```json
//! {
//!   "properties": [
//!     { "data_type": "string", "namespace": "app", "key": "port", "value": "8080" },
//!     { "data_type": "list",   "namespace": "app", "key": "hosts", "value": ["a", "b"] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PropError, Result};

/// Shape of a property's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    List,
    Set,
}

/// Value of a property: a scalar string, or the elements of a list or set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(String),
    Elements(Vec<String>),
}

/// One key of a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub data_type: DataType,
    pub namespace: String,
    pub key: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn string(namespace: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            data_type: DataType::String,
            namespace: namespace.into(),
            key: key.into(),
            value: PropertyValue::Scalar(value.into()),
        }
    }

    pub fn list(namespace: impl Into<String>, key: impl Into<String>, elements: Vec<String>) -> Self {
        Self {
            data_type: DataType::List,
            namespace: namespace.into(),
            key: key.into(),
            value: PropertyValue::Elements(elements),
        }
    }

    pub fn set(namespace: impl Into<String>, key: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            data_type: DataType::Set,
            namespace: namespace.into(),
            key: key.into(),
            value: PropertyValue::Elements(members),
        }
    }

    /// Check that the value's shape agrees with the declared data type
    pub fn validate(&self) -> Result<()> {
        match (self.data_type, &self.value) {
            (DataType::String, PropertyValue::Scalar(_)) => Ok(()),
            (DataType::List | DataType::Set, PropertyValue::Elements(_)) => Ok(()),
            (data_type, _) => Err(PropError::Serialization(format!(
                "Property {}.{} declares {:?} but carries a mismatched value",
                self.namespace, self.key, data_type
            ))),
        }
    }
}

/// A snapshot of many properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCollection {
    pub properties: Vec<Property>,
}

impl PropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }
}

// =============================================================================
// JSON Codec
// =============================================================================

/// Write a collection to `path` as pretty-printed JSON
pub fn write_collection(collection: &PropertyCollection, path: &Path) -> Result<()> {
    let document = serde_json::to_string_pretty(collection)?;
    fs::write(path, document)?;
    tracing::debug!(path = %path.display(), properties = collection.len(), "wrote property collection");
    Ok(())
}

/// Read a collection previously written by [`write_collection`]
pub fn read_collection(path: &Path) -> Result<PropertyCollection> {
    let document = fs::read_to_string(path)?;
    let collection: PropertyCollection = serde_json::from_str(&document)?;
    for property in collection.iter() {
        property.validate()?;
    }
    Ok(collection)
}
