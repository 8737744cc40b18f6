//! `ItemDef` and its `def:Origin` blocks.

use define_model::{ItemDef, Oid, Origin, Result};
use super::text::{alias, document_refs, multi_lang};
use super::{Attr, ElementExt, Ns, skip_child};
use crate::document::Element;

/// ODM and Define-XML children of `ItemDef` that are not read.
const UNMODELLED: &[(Ns, &str)] = &[
    (Ns::Odm, "Question"),
    (Ns::Odm, "ExternalQuestion"),
    (Ns::Odm, "MeasurementUnitRef"),
    (Ns::Odm, "RangeCheck"),
    (Ns::Odm, "Role"),
    (Ns::Def, "ValueListRef"),
];

pub(crate) fn item_def(element: &Element) -> Result<ItemDef> {
    let oid = element.required_oid(Attr::plain("OID"))?;

    let mut code_list_oid = None;
    let mut origins = Vec::new();
    let mut aliases = Vec::new();
    for child in element.elements() {
        if child.is(Ns::Odm, "CodeListRef") {
            code_list_oid = Some(child.required_oid(Attr::plain("CodeListOID"))?);
        } else if child.is(Ns::Def, "Origin") {
            origins.push(origin(child, &oid)?);
        } else if child.is(Ns::Odm, "Alias") {
            aliases.push(alias(child)?);
        } else if !child.is(Ns::Odm, "Description") {
            skip_child(element, &oid, child, UNMODELLED)?;
        }
    }

    Ok(ItemDef {
        name: element.required(Attr::plain("Name"))?.to_string(),
        data_type: element.required(Attr::plain("DataType"))?.to_string(),
        length: element.number(Attr::plain("Length"))?,
        significant_digits: element.number(Attr::plain("SignificantDigits"))?,
        field_name: element.string(Attr::plain("SASFieldName")),
        display_format: element.string(Attr::def("DisplayFormat")),
        description: multi_lang(element, "Description"),
        code_list_oid,
        comment_oid: element.oid(Attr::def("CommentOID"))?,
        origins,
        aliases,
        oid,
    })
}

fn origin(element: &Element, item_oid: &Oid) -> Result<Origin> {
    for child in element.elements() {
        if !(child.is(Ns::Odm, "Description") || child.is(Ns::Def, "DocumentRef")) {
            skip_child(element, item_oid, child, &[])?;
        }
    }
    Ok(Origin {
        origin_type: element.required(Attr::plain("Type"))?.to_string(),
        source: element.string(Attr::plain("Source")),
        description: multi_lang(element, "Description"),
        documents: document_refs(element)?,
    })
}
