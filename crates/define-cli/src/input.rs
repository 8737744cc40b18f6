//! Reading Define-XML files from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use define_model::DefineDocument;
use define_xml::parse_define;
use tracing::info;

/// Reads `path` and parses it with the given encoding label.
///
/// # Errors
///
/// Fails when the file cannot be read or the document does not parse.
pub fn load_document(path: &Path, encoding: &str) -> Result<DefineDocument> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let document =
        parse_define(&bytes, encoding).with_context(|| format!("parse {}", path.display()))?;
    if let Some(mdv) = document.metadata_version() {
        info!(
            path = %path.display(),
            datasets = mdv.item_groups().len(),
            variables = mdv.item_defs().len(),
            code_lists = mdv.code_lists().len(),
            "loaded define document"
        );
    }
    Ok(document)
}
