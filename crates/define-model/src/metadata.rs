//! The assembled, immutable metadata graph and its unresolved input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{CommentDef, Leaf, MethodDef};
use crate::codelist::CodeList;
use crate::dataset::{ItemGroupDef, ItemRef};
use crate::ids::Oid;
use crate::lookup::Arena;
use crate::variable::ItemDef;

/// Attributes of a `MetaDataVersion` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataHeader {
    pub oid: Option<Oid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub define_version: Option<String>,
    /// Define-XML 2.0 `def:StandardName`.
    pub standard_name: Option<String>,
    /// Define-XML 2.0 `def:StandardVersion`.
    pub standard_version: Option<String>,
}

/// Everything extracted from one `MetaDataVersion`, before any reference is
/// checked.
///
/// Reference fields hold raw OIDs. The only way to turn this into a
/// [`MetadataVersion`] is [`MetadataVersion::assemble`], which resolves every
/// reference against the complete set of entities.
#[derive(Debug, Clone, Default)]
pub struct MetadataParts {
    pub header: MetadataHeader,
    pub item_groups: Vec<ItemGroupDef>,
    pub item_defs: Vec<ItemDef>,
    pub code_lists: Vec<CodeList>,
    pub methods: Vec<MethodDef>,
    pub comments: Vec<CommentDef>,
    pub leaves: Vec<Leaf>,
}

/// Lookup tables derived for one dataset during assembly.
#[derive(Debug, Clone, Default)]
pub(crate) struct DatasetIndex {
    /// Arena slot of each link's variable, in link order.
    pub(crate) item_slots: Vec<usize>,
    /// Link OID to 1-based key position.
    pub(crate) key_positions: HashMap<Oid, usize>,
}

/// One study's fully resolved metadata snapshot.
///
/// Every reference held by an entity in here points at an existing entity of
/// the expected kind.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataVersion {
    pub(crate) header: MetadataHeader,
    pub(crate) item_groups: Arena<ItemGroupDef>,
    pub(crate) item_defs: Arena<ItemDef>,
    pub(crate) code_lists: Arena<CodeList>,
    pub(crate) methods: Arena<MethodDef>,
    pub(crate) comments: Arena<CommentDef>,
    pub(crate) leaves: Arena<Leaf>,
    #[serde(skip)]
    pub(crate) datasets: Vec<DatasetIndex>,
    #[serde(skip)]
    pub(crate) code_list_names: HashMap<Oid, String>,
}

/// A dataset link together with the variable it resolves to.
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    pub item_ref: &'a ItemRef,
    pub item_def: &'a ItemDef,
    /// 1-based position in the dataset key, if the link is a key.
    pub key_sequence: Option<usize>,
}

impl MetadataVersion {
    pub fn header(&self) -> &MetadataHeader {
        &self.header
    }

    /// Datasets in declaration order.
    pub fn item_groups(&self) -> &[ItemGroupDef] {
        self.item_groups.as_slice()
    }

    pub fn item_group(&self, oid: &str) -> Option<&ItemGroupDef> {
        self.item_groups.get(oid)
    }

    /// The dataset's links in document order, each resolved to its variable.
    pub fn links(&self, group_oid: &str) -> Option<Vec<Link<'_>>> {
        let slot = self.item_groups.slot(group_oid)?;
        let group = self.item_groups.at(slot);
        let index = &self.datasets[slot];
        let links = group
            .item_refs
            .iter()
            .zip(&index.item_slots)
            .map(|(item_ref, &item_slot)| Link {
                item_ref,
                item_def: self.item_defs.at(item_slot),
                key_sequence: index.key_positions.get(&item_ref.item_oid).copied(),
            })
            .collect();
        Some(links)
    }

    /// 1-based key position of a link within a dataset.
    pub fn key_position(&self, group_oid: &str, link_oid: &str) -> Option<usize> {
        let slot = self.item_groups.slot(group_oid)?;
        self.datasets[slot].key_positions.get(link_oid).copied()
    }

    pub fn item_defs(&self) -> &[ItemDef] {
        self.item_defs.as_slice()
    }

    pub fn item_def(&self, oid: &str) -> Option<&ItemDef> {
        self.item_defs.get(oid)
    }

    pub fn code_lists(&self) -> &[CodeList] {
        self.code_lists.as_slice()
    }

    pub fn code_list(&self, oid: &str) -> Option<&CodeList> {
        self.code_lists.get(oid)
    }

    /// Name of a codelist, from the reverse index built at assembly.
    pub fn code_list_name(&self, oid: &str) -> Option<&str> {
        self.code_list_names.get(oid).map(String::as_str)
    }

    /// The codelist attached to a variable, if any.
    pub fn code_list_for(&self, item_def: &ItemDef) -> Option<&CodeList> {
        item_def
            .code_list_oid
            .as_ref()
            .and_then(|oid| self.code_lists.get(oid.as_str()))
    }

    pub fn methods(&self) -> &[MethodDef] {
        self.methods.as_slice()
    }

    pub fn method(&self, oid: &str) -> Option<&MethodDef> {
        self.methods.get(oid)
    }

    pub fn comments(&self) -> &[CommentDef] {
        self.comments.as_slice()
    }

    pub fn comment(&self, oid: &str) -> Option<&CommentDef> {
        self.comments.get(oid)
    }

    pub fn leaves(&self) -> &[Leaf] {
        self.leaves.as_slice()
    }

    pub fn leaf(&self, id: &str) -> Option<&Leaf> {
        self.leaves.get(id)
    }
}
