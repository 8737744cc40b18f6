//! Dataset definitions and the links that attach variables to them.

use serde::{Deserialize, Serialize};

use crate::annotation::Leaf;
use crate::ids::Oid;
use crate::text::{Alias, MultiLangText};

/// One dataset / domain definition (`ItemGroupDef`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroupDef {
    pub oid: Oid,
    pub name: String,
    pub domain: Option<String>,
    /// `SASDatasetName`.
    pub alternate_name: Option<String>,
    pub repeating: bool,
    pub is_reference_data: Option<bool>,
    pub purpose: Option<String>,
    pub structure: Option<String>,
    pub class_name: Option<String>,
    pub is_non_standard: bool,
    pub has_no_data: bool,
    pub standard_oid: Option<String>,
    pub description: MultiLangText,
    pub comment_oid: Option<Oid>,
    /// `def:ArchiveLocationID`, naming the nested `def:leaf` (or, failing that,
    /// a metadata-level leaf) that holds the dataset file.
    pub archive_location_id: Option<Oid>,
    pub archive_location: Option<Leaf>,
    pub aliases: Vec<Alias>,
    /// Links in document order.
    pub item_refs: Vec<ItemRef>,
    /// Link OIDs in key order. A link's key position is its 1-based index here.
    pub key_order: Vec<Oid>,
}

impl ItemGroupDef {
    /// Link OIDs in document order.
    pub fn link_order(&self) -> impl Iterator<Item = &Oid> {
        self.item_refs.iter().map(|item_ref| &item_ref.item_oid)
    }

    pub fn item_ref(&self, link_oid: &str) -> Option<&ItemRef> {
        self.item_refs
            .iter()
            .find(|item_ref| item_ref.item_oid.as_str() == link_oid)
    }

    /// `1 + index` of the link in [`Self::key_order`], if it is a key.
    pub fn key_position(&self, link_oid: &str) -> Option<usize> {
        self.key_order
            .iter()
            .position(|oid| oid.as_str() == link_oid)
            .map(|index| index + 1)
    }

    pub fn label(&self, lang: Option<&str>) -> Option<&str> {
        self.description.resolve(lang)
    }
}

/// A link between a dataset and a variable (`ItemRef`).
///
/// The link is identified by the `ItemOID` it points to, which is unique within
/// its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub item_oid: Oid,
    /// 1-based position in the owning dataset, in document order.
    pub ordinal: usize,
    /// `OrderNumber` as declared; informational only.
    pub order_number: Option<u32>,
    pub mandatory: bool,
    /// `KeySequence` as declared.
    pub key_sequence: Option<u32>,
    pub role: Option<String>,
    pub role_code_list_oid: Option<Oid>,
    pub method_oid: Option<Oid>,
    pub is_non_standard: bool,
    pub has_no_data: bool,
}
