//! Variable definitions and their provenance.

use serde::{Deserialize, Serialize};

use crate::annotation::DocumentRef;
use crate::ids::Oid;
use crate::text::{Alias, MultiLangText};

/// Provenance of a variable's values (`def:Origin`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// `Type` attribute, e.g. `Collected`, `Derived`, `CRF`, `Assigned`.
    pub origin_type: String,
    /// `Source` attribute (Define-XML 2.1 only).
    pub source: Option<String>,
    pub description: MultiLangText,
    pub documents: Vec<DocumentRef>,
}

/// One variable definition (`ItemDef`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub oid: Oid,
    pub name: String,
    pub data_type: String,
    pub length: Option<u32>,
    pub significant_digits: Option<u32>,
    /// `SASFieldName`.
    pub field_name: Option<String>,
    pub display_format: Option<String>,
    pub description: MultiLangText,
    pub code_list_oid: Option<Oid>,
    pub comment_oid: Option<Oid>,
    /// Origins in declaration order; the first one is authoritative.
    pub origins: Vec<Origin>,
    pub aliases: Vec<Alias>,
}

impl ItemDef {
    /// The authoritative origin, i.e. the first one declared.
    pub fn primary_origin(&self) -> Option<&Origin> {
        self.origins.first()
    }

    pub fn label(&self, lang: Option<&str>) -> Option<&str> {
        self.description.resolve(lang)
    }
}
