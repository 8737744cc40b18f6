//! Error taxonomy for reading Define-XML metadata.
//!
//! Extraction problems abort immediately with a specific variant. Reference
//! resolution collects every broken link and duplicate identifier in the
//! document and reports them together as [`DefineError::Structure`].

use std::fmt;

use thiserror::Error;

use crate::ids::{EntityKind, Oid};

/// Errors raised while loading, extracting, or assembling a Define-XML document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefineError {
    /// The bytes could not be decoded or parsed as well-formed XML.
    #[error("malformed document: {message}")]
    MalformedDocument {
        message: String,
        /// Byte offset reported by the XML reader, when known.
        position: Option<u64>,
    },

    /// The caller supplied an encoding label that is not recognised.
    #[error("unsupported encoding '{label}'")]
    UnsupportedEncoding { label: String },

    /// A required structural element is absent.
    #[error("<{parent}> has no <{element}> element")]
    MissingElement { parent: String, element: String },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute {attribute}")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute value does not parse into its expected type.
    #[error("invalid {attribute} value '{value}' on <{element}>")]
    InvalidValue {
        element: String,
        attribute: String,
        value: String,
    },

    /// A closed-shape element contains a child the mapper does not know.
    #[error("unexpected <{element}> inside <{parent}> {oid}")]
    UnexpectedElement {
        parent: String,
        oid: Oid,
        element: String,
    },

    /// A codelist carries more than one item shape.
    #[error("codelist {oid} mixes {first} and {second} content")]
    AmbiguousCodeListShape {
        oid: Oid,
        first: CodeListShape,
        second: CodeListShape,
    },

    /// An identifier is empty or whitespace only.
    #[error("invalid OID '{value}'")]
    InvalidOid { value: String },

    /// One or more references failed to resolve, or identifiers collided.
    #[error("{}", summarize(.issues))]
    Structure { issues: Vec<StructuralIssue> },
}

/// Result type alias for Define-XML operations.
pub type Result<T> = std::result::Result<T, DefineError>;

impl DefineError {
    /// Create a malformed-document error.
    pub fn malformed(message: impl Into<String>, position: Option<u64>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            position,
        }
    }

    /// Structural issues carried by a [`DefineError::Structure`] error.
    ///
    /// Empty for every other variant.
    pub fn issues(&self) -> &[StructuralIssue] {
        match self {
            Self::Structure { issues } => issues,
            _ => &[],
        }
    }
}

/// A single problem found while building identifier maps or resolving references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralIssue {
    /// Two entities of the same kind declare the same OID.
    #[error("duplicate {kind} OID {oid}{}", scope_suffix(.scope.as_ref()))]
    DuplicateOid {
        kind: EntityKind,
        oid: Oid,
        /// Owning entity when the identifier is only unique within a parent
        /// (item references inside one dataset).
        scope: Option<Oid>,
    },

    /// A reference field names an OID that does not exist for the target kind.
    #[error("{from} references missing {kind} {oid} via {attribute}")]
    DanglingReference {
        /// Kind of the entity the reference should point to.
        kind: EntityKind,
        /// OID of the entity holding the reference.
        from: Oid,
        /// Attribute carrying the reference.
        attribute: &'static str,
        /// The OID that did not resolve.
        oid: Oid,
    },
}

impl StructuralIssue {
    /// The offending OID (the duplicate, or the missing target).
    pub fn oid(&self) -> &Oid {
        match self {
            Self::DuplicateOid { oid, .. } | Self::DanglingReference { oid, .. } => oid,
        }
    }
}

/// The mutually exclusive content shapes of a codelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeListShape {
    CodeListItem,
    EnumeratedItem,
    ExternalCodeList,
}

impl fmt::Display for CodeListShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CodeListItem => "CodeListItem",
            Self::EnumeratedItem => "EnumeratedItem",
            Self::ExternalCodeList => "ExternalCodeList",
        })
    }
}

fn scope_suffix(scope: Option<&Oid>) -> String {
    scope.map(|oid| format!(" in {oid}")).unwrap_or_default()
}

fn summarize(issues: &[StructuralIssue]) -> String {
    match issues {
        [] => "structural validation failed".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more structural issues)", rest.len()),
    }
}
