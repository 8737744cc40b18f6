//! Define-XML reading.
//!
//! [`parse_define`] turns document bytes into a resolved
//! [`DefineDocument`]. It runs three stages in strict order: the
//! [`document`] loader builds a namespaced tree, the extractors copy every
//! modelled element into unresolved records, and
//! [`MetadataVersion::assemble`](define_model::MetadataVersion::assemble)
//! checks every cross-reference before the model is handed out.

pub mod document;
pub mod extract;

use define_model::{DefineDocument, Result};
use tracing::info_span;

pub use document::{Element, load};
pub use extract::{
    DEF_NAMESPACE_V20, DEF_NAMESPACE_V21, ExtractedDocument, ODM_NAMESPACE, XLINK_NAMESPACE,
    extract_document,
};

/// Encoding assumed when the caller has no better information.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Parses a Define-XML document.
///
/// `encoding` is a WHATWG encoding label such as `UTF-8` or `ISO-8859-1`. A
/// byte order mark in `bytes` takes precedence over it.
///
/// # Errors
///
/// Returns [`define_model::DefineError`] when the bytes cannot be decoded or
/// parsed, when a modelled element is missing required content, or, as one
/// [`define_model::DefineError::Structure`] batch, when identifiers repeat or
/// references do not resolve.
pub fn parse_define(bytes: &[u8], encoding: &str) -> Result<DefineDocument> {
    let span = info_span!("parse_define", bytes = bytes.len(), encoding);
    let _guard = span.enter();

    let root = document::load(bytes, encoding)?;
    extract::extract_document(&root)?.assemble()
}

/// Parses an already decoded Define-XML document.
///
/// # Errors
///
/// Same as [`parse_define`], minus decoding failures.
pub fn parse_define_str(text: &str) -> Result<DefineDocument> {
    let span = info_span!("parse_define", bytes = text.len(), encoding = "decoded");
    let _guard = span.enter();

    let root = document::parse(text)?;
    extract::extract_document(&root)?.assemble()
}
