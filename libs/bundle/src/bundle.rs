//! FHIR Bundle container
//!
//! The bundle is kept deliberately loose: each entry's resource stays a raw
//! `serde_json::Value` so that cloning and re-serializing a bundle preserves
//! every field the pipeline does not understand. Typed access goes through
//! the view structs in [`crate::resource`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Top-level container of all resources for one patient's record set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Entries in the bundle, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<Entry>,

    /// Additional content beyond the fields the pipeline reads
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// One slot in a bundle: an optional stable identifier plus one resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Stable identifier used for internal cross-referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// The embedded resource
    pub resource: Value,

    /// Additional content beyond the fields the pipeline reads
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl Entry {
    /// The `resourceType` discriminator of the embedded resource.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource.get("resourceType").and_then(Value::as_str)
    }

    /// The embedded resource's own `id`.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource.get("id").and_then(Value::as_str)
    }
}

impl Bundle {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    /// Convert to a JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Entries as a slice, in bundle order
    pub fn entries(&self) -> &[Entry] {
        &self.entry
    }

    /// Entries as a mutable slice
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entry
    }
}
