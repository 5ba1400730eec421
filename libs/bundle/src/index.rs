//! Bundle indexing
//!
//! `BundleIndex` is built once per run and gives O(1)-amortized lookup by
//! `fullUrl`, by resource id and by resource type. Call sites never walk
//! the raw entry list themselves.

use crate::bundle::{Bundle, Entry};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Lookup structures over one bundle's entries.
///
/// Type buckets preserve bundle order, so iteration over the resources of
/// a type sees them exactly as the document lists them.
pub struct BundleIndex<'a> {
    bundle: &'a Bundle,
    by_full_url: HashMap<&'a str, usize>,
    by_id: HashMap<&'a str, usize>,
    by_type: HashMap<&'a str, Vec<usize>>,
}

impl<'a> BundleIndex<'a> {
    /// Index the bundle's entries.
    pub fn new(bundle: &'a Bundle) -> Self {
        let mut by_full_url = HashMap::new();
        let mut by_id = HashMap::new();
        let mut by_type: HashMap<&str, Vec<usize>> = HashMap::new();

        for (pos, entry) in bundle.entries().iter().enumerate() {
            if let Some(url) = entry.full_url.as_deref() {
                by_full_url.entry(url).or_insert(pos);
            }
            if let Some(id) = entry.resource_id() {
                by_id.entry(id).or_insert(pos);
            }
            if let Some(resource_type) = entry.resource_type() {
                by_type.entry(resource_type).or_default().push(pos);
            }
        }

        Self {
            bundle,
            by_full_url,
            by_id,
            by_type,
        }
    }

    /// The entry with the given `fullUrl`.
    pub fn entry_by_full_url(&self, url: &str) -> Result<&'a Entry> {
        self.by_full_url
            .get(url)
            .map(|&pos| &self.bundle.entries()[pos])
            .ok_or_else(|| Error::ReferenceNotFound(url.to_string()))
    }

    /// The entry whose resource carries the given `id`.
    pub fn entry_by_resource_id(&self, id: &str) -> Option<&'a Entry> {
        self.by_id.get(id).map(|&pos| &self.bundle.entries()[pos])
    }

    /// Raw resources of one type, in bundle order.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<&'a Value> {
        self.by_type
            .get(resource_type)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| &self.bundle.entries()[pos].resource)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Typed views of every resource of one type, in bundle order.
    pub fn typed_resources<T: DeserializeOwned>(&self, resource_type: &str) -> Result<Vec<T>> {
        self.resources_of_type(resource_type)
            .into_iter()
            .map(|value| serde_json::from_value(value.clone()).map_err(Error::from))
            .collect()
    }

    /// Typed view of the first resource of one type.
    ///
    /// Missing resources of a requested type are malformed input, not a
    /// recoverable condition.
    pub fn first_of_type<T: DeserializeOwned>(&self, resource_type: &str) -> Result<T> {
        let value = self
            .resources_of_type(resource_type)
            .into_iter()
            .next()
            .ok_or_else(|| Error::ResourceNotFound {
                resource_type: resource_type.to_string(),
            })?;
        serde_json::from_value(value.clone()).map_err(Error::from)
    }
}
