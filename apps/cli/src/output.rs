//! Output-bundle mutation and persistence
//!
//! The output bundle is a private copy of the input; the only mutation the
//! pipeline ever makes is writing a generated note into a
//! DocumentReference attachment as a base64 payload.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use scribe_bundle::Bundle;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the annotated bundle is written to.
pub const OUTPUT_DIR: &str = "output";

/// Encode `text` and store it as the attachment payload of the
/// DocumentReference with the given id.
pub fn apply(output: &mut Bundle, document_reference_id: &str, text: &str) -> Result<()> {
    let encoded = STANDARD.encode(text);

    let entry = output
        .entries_mut()
        .iter_mut()
        .find(|e| {
            e.resource.get("resourceType").and_then(Value::as_str) == Some("DocumentReference")
                && e.resource.get("id").and_then(Value::as_str) == Some(document_reference_id)
        })
        .ok_or_else(|| Error::DocumentReferenceNotFound(document_reference_id.to_string()))?;

    let attachment = entry
        .resource
        .pointer_mut("/content/0/attachment")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::AttachmentMissing(document_reference_id.to_string()))?;
    attachment.insert("data".to_string(), Value::String(encoded));

    Ok(())
}

/// Serialize the output bundle next to `output/`, named after the input
/// file. Overwrites a previous run's file of the same name.
pub fn persist(input_path: &Path, output: &Bundle) -> Result<PathBuf> {
    persist_to(Path::new(OUTPUT_DIR), input_path, output)
}

pub fn persist_to(dir: &Path, input_path: &Path, output: &Bundle) -> Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| Error::InvalidOutputPath(input_path.to_path_buf()))?;

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(output)?;
    fs::write(&path, json)?;

    Ok(path)
}
