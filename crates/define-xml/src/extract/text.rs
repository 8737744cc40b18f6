//! Shared child blocks: translated text, aliases, and document references.

use define_model::{Alias, DocumentRef, MultiLangText, PdfPageRef, Result, TranslatedText};

use super::{Attr, ElementExt, Ns};
use crate::document::Element;

/// Collects the `TranslatedText` children of a `Description`, `Decode`, or
/// similar block.
pub(crate) fn translated(block: &Element) -> Vec<TranslatedText> {
    block
        .children_named(Ns::Odm, "TranslatedText")
        .map(|text| {
            TranslatedText::new(
                text.string(Attr::xml("lang")),
                text.text().trim().to_string(),
            )
        })
        .collect()
}

/// Merges every `local` block under `parent` into one multi-language text.
pub(crate) fn multi_lang(parent: &Element, local: &'static str) -> MultiLangText {
    parent
        .children_named(Ns::Odm, local)
        .flat_map(translated)
        .collect::<Vec<_>>()
        .into()
}

pub(crate) fn alias(element: &Element) -> Result<Alias> {
    Ok(Alias {
        context: element.required(Attr::plain("Context"))?.to_string(),
        name: element.required(Attr::plain("Name"))?.to_string(),
    })
}

pub(crate) fn aliases(parent: &Element) -> Result<Vec<Alias>> {
    parent.children_named(Ns::Odm, "Alias").map(alias).collect()
}

pub(crate) fn document_refs(parent: &Element) -> Result<Vec<DocumentRef>> {
    parent
        .children_named(Ns::Def, "DocumentRef")
        .map(document_ref)
        .collect()
}

fn document_ref(element: &Element) -> Result<DocumentRef> {
    let pages = element
        .children_named(Ns::Def, "PDFPageRef")
        .map(|page| {
            Ok(PdfPageRef {
                page_type: page.required(Attr::plain("Type"))?.to_string(),
                page_refs: page.string(Attr::plain("PageRefs")),
                first_page: page.number(Attr::plain("FirstPage"))?,
                last_page: page.number(Attr::plain("LastPage"))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DocumentRef {
        leaf_id: element.required_oid(Attr::plain("leafID"))?,
        pages,
    })
}
