//! Cross-entry reference resolution
//!
//! References come in two shapes: a literal `fullUrl` match, and an
//! identifier-equality match against a resource's own `id` (seen when the
//! source omits `fullUrl` on the referenced entry). The resolver tries
//! these in a fixed order; a reference that matches neither is a
//! data-integrity error.

use crate::error::{Error, Result};
use crate::index::BundleIndex;
use serde_json::Value;

/// Reference prefix used for synthetic intra-bundle identifiers.
pub const URN_UUID_PREFIX: &str = "urn:uuid:";

/// Resolves reference strings to the resource they point at.
pub struct ReferenceResolver<'a, 'b> {
    index: &'b BundleIndex<'a>,
}

impl<'a, 'b> ReferenceResolver<'a, 'b> {
    pub fn new(index: &'b BundleIndex<'a>) -> Self {
        Self { index }
    }

    /// Resolve a reference string to the referenced resource.
    pub fn resolve(&self, reference: &str) -> Result<&'a Value> {
        if let Ok(entry) = self.index.entry_by_full_url(reference) {
            return Ok(&entry.resource);
        }

        let id = reference.strip_prefix(URN_UUID_PREFIX).unwrap_or(reference);
        if let Some(entry) = self.index.entry_by_resource_id(id) {
            return Ok(&entry.resource);
        }

        Err(Error::ReferenceNotFound(reference.to_string()))
    }
}
