//! `ItemGroupDef` and its `ItemRef` links.

use define_model::{ItemGroupDef, ItemRef, Oid, Result};
use super::annotation::leaf;
use super::text::{alias, multi_lang};
use super::{Attr, ElementExt, Ns, skip_child};
use crate::document::Element;

pub(crate) fn item_group(element: &Element) -> Result<ItemGroupDef> {
    let oid = element.required_oid(Attr::plain("OID"))?;

    let mut item_refs = Vec::new();
    let mut aliases = Vec::new();
    let mut archive_location = None;
    let mut class_name = element.string(Attr::def("Class"));
    for child in element.elements() {
        if child.is(Ns::Odm, "ItemRef") {
            item_refs.push(item_ref(child, item_refs.len() + 1)?);
        } else if child.is(Ns::Odm, "Alias") {
            aliases.push(alias(child)?);
        } else if child.is(Ns::Def, "leaf") {
            archive_location = Some(leaf(child)?);
        } else if child.is(Ns::Def, "Class") {
            class_name = Some(child.required(Attr::plain("Name"))?.to_string());
        } else if !child.is(Ns::Odm, "Description") {
            skip_child(element, &oid, child, &[])?;
        }
    }
    let key_order = key_order(&item_refs);

    Ok(ItemGroupDef {
        name: element.required(Attr::plain("Name"))?.to_string(),
        domain: element.string(Attr::plain("Domain")),
        alternate_name: element.string(Attr::plain("SASDatasetName")),
        repeating: element.flag(Attr::plain("Repeating"))?.unwrap_or(false),
        is_reference_data: element.flag(Attr::plain("IsReferenceData"))?,
        purpose: element.string(Attr::plain("Purpose")),
        structure: element.string(Attr::def("Structure")),
        class_name,
        is_non_standard: element.flag(Attr::def("IsNonStandard"))?.unwrap_or(false),
        has_no_data: element.flag(Attr::def("HasNoData"))?.unwrap_or(false),
        standard_oid: element.string(Attr::def("StandardOID")),
        description: multi_lang(element, "Description"),
        comment_oid: element.oid(Attr::def("CommentOID"))?,
        archive_location_id: element.oid(Attr::def("ArchiveLocationID"))?,
        archive_location,
        aliases,
        item_refs,
        key_order,
        oid,
    })
}

/// `ordinal` is the 1-based position among the group's `ItemRef` elements.
fn item_ref(element: &Element, ordinal: usize) -> Result<ItemRef> {
    Ok(ItemRef {
        item_oid: element.required_oid(Attr::plain("ItemOID"))?,
        ordinal,
        order_number: element.number(Attr::plain("OrderNumber"))?,
        mandatory: element.flag(Attr::plain("Mandatory"))?.unwrap_or(false),
        key_sequence: element.number(Attr::plain("KeySequence"))?,
        role: element.string(Attr::plain("Role")),
        role_code_list_oid: element.oid(Attr::plain("RoleCodeListOID"))?,
        method_oid: element.oid(Attr::plain("MethodOID"))?,
        is_non_standard: element.flag(Attr::def("IsNonStandard"))?.unwrap_or(false),
        has_no_data: element.flag(Attr::def("HasNoData"))?.unwrap_or(false),
    })
}

/// Links carrying a `KeySequence`, ordered by it. Ties keep document order.
fn key_order(item_refs: &[ItemRef]) -> Vec<Oid> {
    let mut keys: Vec<(u32, &Oid)> = item_refs
        .iter()
        .filter_map(|item_ref| item_ref.key_sequence.map(|seq| (seq, &item_ref.item_oid)))
        .collect();
    keys.sort_by_key(|(seq, _)| *seq);
    keys.into_iter().map(|(_, oid)| oid.clone()).collect()
}
