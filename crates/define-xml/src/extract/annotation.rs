//! `def:CommentDef`, `MethodDef`, and `def:leaf`.

use define_model::{CommentDef, FormalExpression, Leaf, MethodDef, Result};

use super::text::{document_refs, multi_lang};
use super::{Attr, ElementExt, Ns, skip_child};
use crate::document::Element;

pub(crate) fn comment(element: &Element) -> Result<CommentDef> {
    let oid = element.required_oid(Attr::plain("OID"))?;
    for child in element.elements() {
        if !(child.is(Ns::Odm, "Description") || child.is(Ns::Def, "DocumentRef")) {
            skip_child(element, &oid, child, &[])?;
        }
    }
    Ok(CommentDef {
        oid,
        description: multi_lang(element, "Description"),
        documents: document_refs(element)?,
    })
}

pub(crate) fn method(element: &Element) -> Result<MethodDef> {
    let oid = element.required_oid(Attr::plain("OID"))?;
    for child in element.elements() {
        let modelled = child.is(Ns::Odm, "Description")
            || child.is(Ns::Odm, "FormalExpression")
            || child.is(Ns::Def, "DocumentRef");
        if !modelled {
            skip_child(element, &oid, child, &[(Ns::Odm, "Alias")])?;
        }
    }
    let expressions = element
        .children_named(Ns::Odm, "FormalExpression")
        .map(|expression| FormalExpression {
            context: expression.string(Attr::plain("Context")),
            expression: expression.text().trim().to_string(),
        })
        .collect();
    Ok(MethodDef {
        oid,
        name: element.required(Attr::plain("Name"))?.to_string(),
        method_type: element.required(Attr::plain("Type"))?.to_string(),
        description: multi_lang(element, "Description"),
        documents: document_refs(element)?,
        expressions,
    })
}

pub(crate) fn leaf(element: &Element) -> Result<Leaf> {
    let id = element.required_oid(Attr::plain("ID"))?;
    for child in element.elements() {
        if !child.is(Ns::Def, "title") {
            skip_child(element, &id, child, &[])?;
        }
    }
    Ok(Leaf {
        id,
        href: element.required(Attr::xlink("href"))?.to_string(),
        title: element
            .child(Ns::Def, "title")
            .and_then(ElementExt::trimmed_text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn method_keeps_expressions_in_order() {
        let el = parse(
            r#"<MethodDef xmlns:def="http://www.cdisc.org/ns/def/v2.1"
                          OID="MT.AESEQ" Name="Algorithm to derive AESEQ" Type="Computation">
                 <Description><TranslatedText xml:lang="en">Sequential number</TranslatedText></Description>
                 <def:DocumentRef leafID="LF.CSDRG"/>
                 <FormalExpression Context="SAS">aeseq = _n_;</FormalExpression>
                 <FormalExpression Context="R">seq_along(x)</FormalExpression>
               </MethodDef>"#,
        )
        .expect("parse");
        let method = method(&el).expect("method");
        assert_eq!(method.method_type, "Computation");
        assert_eq!(method.description.single(), Some("Sequential number"));
        assert_eq!(method.documents[0].leaf_id.as_str(), "LF.CSDRG");
        let contexts: Vec<Option<&str>> = method
            .expressions
            .iter()
            .map(|expression| expression.context.as_deref())
            .collect();
        assert_eq!(contexts, vec![Some("SAS"), Some("R")]);
    }

    #[test]
    fn comment_rejects_unknown_define_children() {
        let el = parse(
            r#"<def:CommentDef xmlns:def="http://www.cdisc.org/ns/def/v2.1" OID="COM.AE">
                 <Description><TranslatedText>See guide</TranslatedText></Description>
                 <def:DocumentRefs leafID="LF.CSDRG"/>
               </def:CommentDef>"#,
        )
        .expect("parse");
        let err = comment(&el).expect_err("mistyped child");
        assert_eq!(
            err.to_string(),
            "unexpected <def:DocumentRefs> inside <def:CommentDef> COM.AE"
        );
    }

    #[test]
    fn method_skips_alias_and_vendor_children() {
        let el = parse(
            r#"<MethodDef xmlns:x="urn:example:tool" OID="MT.X" Name="X" Type="Imputation">
                 <Alias Context="SPSS" Name="IMP01"/>
                 <x:Author>stats</x:Author>
               </MethodDef>"#,
        )
        .expect("parse");
        assert_eq!(method(&el).expect("method").oid.as_str(), "MT.X");
    }

    #[test]
    fn leaf_requires_xlink_href() {
        let el = parse(
            r#"<def:leaf xmlns:def="http://www.cdisc.org/ns/def/v2.0"
                         xmlns:xlink="http://www.w3.org/1999/xlink"
                         ID="LF.ACRF" xlink:href="acrf.pdf">
                 <def:title> Annotated CRF </def:title>
               </def:leaf>"#,
        )
        .expect("parse");
        let leaf = leaf(&el).expect("leaf");
        assert_eq!(leaf.href, "acrf.pdf");
        assert_eq!(leaf.title.as_deref(), Some("Annotated CRF"));

        let bare = parse(
            r#"<def:leaf xmlns:def="http://www.cdisc.org/ns/def/v2.0" ID="LF.X" href="x.pdf"/>"#,
        )
        .expect("parse");
        let err = super::leaf(&bare).expect_err("unqualified href");
        assert_eq!(
            err.to_string(),
            "<def:leaf> is missing required attribute xlink:href"
        );
    }
}
