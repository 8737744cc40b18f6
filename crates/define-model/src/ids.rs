#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use crate::DefineError;

/// An opaque Define-XML object identifier.
///
/// OIDs are unique per [`EntityKind`] within one metadata version. The value is
/// kept verbatim, so `IG.AE` and ` IG.AE` are different identifiers.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Oid(String);

impl Oid {
    pub fn new(value: impl Into<String>) -> Result<Self, DefineError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DefineError::InvalidOid { value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Oid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The entity kinds that own an OID namespace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EntityKind {
    ItemGroupDef,
    /// Item references are keyed by their `ItemOID` within one dataset.
    ItemRef,
    ItemDef,
    CodeList,
    Comment,
    Method,
    Leaf,
}

impl EntityKind {
    /// Element name used for this kind in Define-XML.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::ItemGroupDef => "ItemGroupDef",
            Self::ItemRef => "ItemRef",
            Self::ItemDef => "ItemDef",
            Self::CodeList => "CodeList",
            Self::Comment => "def:CommentDef",
            Self::Method => "MethodDef",
            Self::Leaf => "def:leaf",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ItemGroupDef => "ItemGroupDef",
            Self::ItemRef => "ItemRef",
            Self::ItemDef => "ItemDef",
            Self::CodeList => "CodeList",
            Self::Comment => "Comment",
            Self::Method => "Method",
            Self::Leaf => "Leaf",
        })
    }
}
