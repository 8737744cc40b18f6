//! `CodeList` extraction and shape detection.
//!
//! A codelist holds exactly one kind of content: decoded `CodeListItem`s, bare
//! `EnumeratedItem`s, or a single `ExternalCodeList`. The first content child
//! fixes the shape; any other shape after it is an error.

use define_model::{
    CodeList, CodeListContent, CodeListItem, CodeListShape, DefineError, EnumeratedItem,
    ExternalCodeList, Oid, Result,
};
use tracing::warn;

use super::text::{alias, multi_lang};
use super::{Attr, ElementExt, Ns, skip_child};
use crate::document::Element;

pub(crate) fn code_list(element: &Element) -> Result<CodeList> {
    let oid = element.required_oid(Attr::plain("OID"))?;

    let mut content: Option<CodeListContent> = None;
    let mut aliases = Vec::new();
    for child in element.elements() {
        let Some(shape) = shape_of(child) else {
            if child.is(Ns::Odm, "Alias") {
                aliases.push(alias(child)?);
            } else if !child.is(Ns::Odm, "Description") {
                skip_child(element, &oid, child, &[])?;
            }
            continue;
        };

        content = Some(match (content.take(), shape) {
            (None, CodeListShape::CodeListItem) => {
                CodeListContent::Decoded(vec![code_list_item(&oid, child)?])
            }
            (None, CodeListShape::EnumeratedItem) => {
                CodeListContent::Enumerated(vec![enumerated_item(&oid, child)?])
            }
            (None, CodeListShape::ExternalCodeList) => {
                CodeListContent::External(external(child))
            }
            (Some(CodeListContent::Decoded(mut items)), CodeListShape::CodeListItem) => {
                items.push(code_list_item(&oid, child)?);
                CodeListContent::Decoded(items)
            }
            (Some(CodeListContent::Enumerated(mut items)), CodeListShape::EnumeratedItem) => {
                items.push(enumerated_item(&oid, child)?);
                CodeListContent::Enumerated(items)
            }
            (Some(existing), second) => {
                return Err(DefineError::AmbiguousCodeListShape {
                    oid,
                    first: shape_of_content(&existing),
                    second,
                });
            }
        });
    }

    let content = content.unwrap_or_else(|| {
        warn!(code_list = %oid, "codelist has no items, treating it as an empty enumeration");
        CodeListContent::Enumerated(Vec::new())
    });

    Ok(CodeList {
        name: element.required(Attr::plain("Name"))?.to_string(),
        data_type: element.required(Attr::plain("DataType"))?.to_string(),
        format_name: element.string(Attr::plain("SASFormatName")),
        is_non_standard: element.flag(Attr::def("IsNonStandard"))?.unwrap_or(false),
        standard_oid: element.string(Attr::def("StandardOID")),
        comment_oid: element.oid(Attr::def("CommentOID"))?,
        description: multi_lang(element, "Description"),
        content,
        aliases,
        oid,
    })
}

fn shape_of(child: &Element) -> Option<CodeListShape> {
    if child.is(Ns::Odm, "CodeListItem") {
        Some(CodeListShape::CodeListItem)
    } else if child.is(Ns::Odm, "EnumeratedItem") {
        Some(CodeListShape::EnumeratedItem)
    } else if child.is(Ns::Odm, "ExternalCodeList") {
        Some(CodeListShape::ExternalCodeList)
    } else {
        None
    }
}

fn shape_of_content(content: &CodeListContent) -> CodeListShape {
    match content {
        CodeListContent::Decoded(_) => CodeListShape::CodeListItem,
        CodeListContent::Enumerated(_) => CodeListShape::EnumeratedItem,
        CodeListContent::External(_) => CodeListShape::ExternalCodeList,
    }
}

fn code_list_item(oid: &Oid, item: &Element) -> Result<CodeListItem> {
    let mut aliases = Vec::new();
    for child in item.elements() {
        if child.is(Ns::Odm, "Alias") {
            aliases.push(alias(child)?);
        } else if !child.is(Ns::Odm, "Decode") {
            skip_child(item, oid, child, &[])?;
        }
    }
    Ok(CodeListItem {
        coded_value: item.required(Attr::plain("CodedValue"))?.to_string(),
        rank: item.number(Attr::plain("Rank"))?,
        order_number: item.number(Attr::plain("OrderNumber"))?,
        extended_value: item.flag(Attr::def("ExtendedValue"))?.unwrap_or(false),
        decode: multi_lang(item, "Decode"),
        aliases,
    })
}

fn enumerated_item(oid: &Oid, item: &Element) -> Result<EnumeratedItem> {
    let mut aliases = Vec::new();
    for child in item.elements() {
        if child.is(Ns::Odm, "Alias") {
            aliases.push(alias(child)?);
        } else {
            skip_child(item, oid, child, &[])?;
        }
    }
    Ok(EnumeratedItem {
        coded_value: item.required(Attr::plain("CodedValue"))?.to_string(),
        rank: item.number(Attr::plain("Rank"))?,
        order_number: item.number(Attr::plain("OrderNumber"))?,
        extended_value: item.flag(Attr::def("ExtendedValue"))?.unwrap_or(false),
        aliases,
    })
}

fn external(element: &Element) -> ExternalCodeList {
    ExternalCodeList {
        dictionary: element.string(Attr::plain("Dictionary")),
        version: element.string(Attr::plain("Version")),
        reference: element.string(Attr::plain("ref")),
        href: element.string(Attr::plain("href")),
    }
}
