//! The `ODM` envelope, its `Study`, and `MetaDataVersion` dispatch.

use define_model::{
    DefineDocument, DefineError, GlobalVariables, MetadataHeader, MetadataParts,
    MetadataVersion, OdmHeader, Oid, Result, Study,
};
use tracing::debug;

use super::annotation::{comment, leaf, method};
use super::codelist::code_list;
use super::dataset::item_group;
use super::variable::item_def;
use super::{Attr, ElementExt, Ns, skip_child};
use crate::document::Element;

/// Everything pulled out of one document, with references still unchecked.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub header: OdmHeader,
    pub study_oid: Oid,
    pub global_variables: GlobalVariables,
    pub metadata: Option<MetadataParts>,
}

impl ExtractedDocument {
    /// Resolves the metadata version, if any, into the final document.
    ///
    /// # Errors
    ///
    /// Propagates [`DefineError::Structure`] from assembly.
    pub fn assemble(self) -> Result<DefineDocument> {
        let metadata_version = self.metadata.map(MetadataVersion::assemble).transpose()?;
        Ok(DefineDocument {
            header: self.header,
            study: Study {
                oid: self.study_oid,
                global_variables: self.global_variables,
                metadata_version,
            },
        })
    }
}

/// Walks the `ODM` root and extracts every modelled entity.
///
/// # Errors
///
/// Returns the first extraction error: a missing `ODM` root or `Study`, a
/// repeated `Study` or `MetaDataVersion`, a missing or invalid attribute, or
/// an ambiguous or unexpected codelist child.
pub fn extract_document(root: &Element) -> Result<ExtractedDocument> {
    if !root.is(Ns::Odm, "ODM") {
        return Err(DefineError::MissingElement {
            parent: "document".to_string(),
            element: "ODM".to_string(),
        });
    }

    let mut studies = root.children_named(Ns::Odm, "Study");
    let study = studies.next().ok_or_else(|| DefineError::MissingElement {
        parent: "ODM".to_string(),
        element: "Study".to_string(),
    })?;
    let study_oid = study.required_oid(Attr::plain("OID"))?;
    if let Some(extra) = studies.next() {
        return Err(DefineError::UnexpectedElement {
            parent: "ODM".to_string(),
            oid: study_oid,
            element: extra.tag(),
        });
    }

    let mut versions = study.children_named(Ns::Odm, "MetaDataVersion");
    let metadata = versions
        .next()
        .map(|version| metadata_version(version, &study_oid))
        .transpose()?;
    if let Some(extra) = versions.next() {
        return Err(DefineError::UnexpectedElement {
            parent: "Study".to_string(),
            oid: study_oid,
            element: extra.tag(),
        });
    }

    Ok(ExtractedDocument {
        header: odm_header(root),
        global_variables: study
            .child(Ns::Odm, "GlobalVariables")
            .map(global_variables)
            .unwrap_or_default(),
        study_oid,
        metadata,
    })
}

fn odm_header(root: &Element) -> OdmHeader {
    OdmHeader {
        file_oid: root.string(Attr::plain("FileOID")),
        file_type: root.string(Attr::plain("FileType")),
        odm_version: root.string(Attr::plain("ODMVersion")),
        creation_date_time: root.string(Attr::plain("CreationDateTime")),
        originator: root.string(Attr::plain("Originator")),
        source_system: root.string(Attr::plain("SourceSystem")),
        source_system_version: root.string(Attr::plain("SourceSystemVersion")),
        context: root.string(Attr::def("Context")),
    }
}

fn global_variables(element: &Element) -> GlobalVariables {
    let text = |local: &'static str| {
        element
            .child(Ns::Odm, local)
            .and_then(ElementExt::trimmed_text)
    };
    GlobalVariables {
        study_name: text("StudyName"),
        study_description: text("StudyDescription"),
        protocol_name: text("ProtocolName"),
    }
}

/// ODM and Define-XML children of `MetaDataVersion` that are not read.
const UNMODELLED: &[(Ns, &str)] = &[
    (Ns::Odm, "Include"),
    (Ns::Odm, "Protocol"),
    (Ns::Odm, "StudyEventDef"),
    (Ns::Odm, "FormDef"),
    (Ns::Odm, "ConditionDef"),
    (Ns::Odm, "ImputationMethod"),
    (Ns::Odm, "Presentation"),
    (Ns::Def, "Standards"),
    (Ns::Def, "AnnotatedCRF"),
    (Ns::Def, "SupplementalDoc"),
    (Ns::Def, "ValueListDef"),
    (Ns::Def, "WhereClauseDef"),
];

/// `study_oid` names the version in errors when it has no `OID` of its own.
fn metadata_version(element: &Element, study_oid: &Oid) -> Result<MetadataParts> {
    let mut parts = MetadataParts {
        header: MetadataHeader {
            oid: element.oid(Attr::plain("OID"))?,
            name: element.string(Attr::plain("Name")),
            description: element.string(Attr::plain("Description")),
            define_version: element.string(Attr::def("DefineVersion")),
            standard_name: element.string(Attr::def("StandardName")),
            standard_version: element.string(Attr::def("StandardVersion")),
        },
        ..MetadataParts::default()
    };

    for child in element.elements() {
        if child.is(Ns::Odm, "ItemGroupDef") {
            parts.item_groups.push(item_group(child)?);
        } else if child.is(Ns::Odm, "ItemDef") {
            parts.item_defs.push(item_def(child)?);
        } else if child.is(Ns::Odm, "CodeList") {
            parts.code_lists.push(code_list(child)?);
        } else if child.is(Ns::Odm, "MethodDef") {
            parts.methods.push(method(child)?);
        } else if child.is(Ns::Def, "CommentDef") {
            parts.comments.push(comment(child)?);
        } else if child.is(Ns::Def, "leaf") {
            parts.leaves.push(leaf(child)?);
        } else {
            let oid = parts.header.oid.as_ref().unwrap_or(study_oid);
            skip_child(element, oid, child, UNMODELLED)?;
        }
    }

    debug!(
        item_groups = parts.item_groups.len(),
        item_defs = parts.item_defs.len(),
        code_lists = parts.code_lists.len(),
        methods = parts.methods.len(),
        comments = parts.comments.len(),
        leaves = parts.leaves.len(),
        "extracted metadata version"
    );
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn extract(xml: &str) -> Result<ExtractedDocument> {
        extract_document(&parse(xml).expect("parse"))
    }

    #[test]
    fn study_without_metadata_version() {
        let doc = extract(
            r#"<ODM xmlns="http://www.cdisc.org/ns/odm/v1.3" FileOID="F.1" ODMVersion="1.3.2">
                 <Study OID="S.1">
                   <GlobalVariables>
                     <StudyName>CDISC01</StudyName>
                     <StudyDescription> Pilot </StudyDescription>
                     <ProtocolName>CDISC01</ProtocolName>
                   </GlobalVariables>
                 </Study>
               </ODM>"#,
        )
        .expect("extract");
        assert_eq!(doc.header.odm_version.as_deref(), Some("1.3.2"));
        assert_eq!(doc.study_oid.as_str(), "S.1");
        assert_eq!(doc.global_variables.study_description.as_deref(), Some("Pilot"));
        assert!(doc.metadata.is_none());
        let assembled = doc.assemble().expect("assemble");
        assert!(assembled.metadata_version().is_none());
    }

    #[test]
    fn root_must_be_odm_with_one_study() {
        let err = extract("<Define/>").expect_err("not ODM");
        assert!(matches!(err, DefineError::MissingElement { ref element, .. } if element == "ODM"));

        let err = extract("<ODM/>").expect_err("no study");
        assert_eq!(err.to_string(), "<ODM> has no <Study> element");

        let err = extract(r#"<ODM><Study OID="S.1"/><Study OID="S.2"/></ODM>"#)
            .expect_err("two studies");
        assert!(matches!(err, DefineError::UnexpectedElement { .. }));
    }

    #[test]
    fn second_metadata_version_is_rejected() {
        let err = extract(
            r#"<ODM><Study OID="S.1">
                 <MetaDataVersion OID="MDV.1"/>
                 <MetaDataVersion OID="MDV.2"/>
               </Study></ODM>"#,
        )
        .expect_err("two versions");
        assert!(matches!(
            err,
            DefineError::UnexpectedElement { ref element, .. } if element == "MetaDataVersion"
        ));
    }

    #[test]
    fn value_level_metadata_is_skipped() {
        let doc = extract(
            r#"<ODM xmlns:def="http://www.cdisc.org/ns/def/v2.0"><Study OID="S.1">
                 <MetaDataVersion OID="MDV.1" Name="Study CDISC01" def:DefineVersion="2.0.0">
                   <def:ValueListDef OID="VL.X"><ItemRef ItemOID="IT.MISSING" Mandatory="No"/></def:ValueListDef>
                   <def:WhereClauseDef OID="WC.X"/>
                   <def:AnnotatedCRF><def:DocumentRef leafID="LF.ACRF"/></def:AnnotatedCRF>
                 </MetaDataVersion>
               </Study></ODM>"#,
        )
        .expect("extract");
        let parts = doc.metadata.expect("metadata");
        assert_eq!(parts.header.define_version.as_deref(), Some("2.0.0"));
        assert!(parts.item_groups.is_empty());
        assert!(parts.item_defs.is_empty());
    }

    #[test]
    fn mistyped_metadata_child_is_unexpected() {
        let err = extract(
            r#"<ODM xmlns:def="http://www.cdisc.org/ns/def/v2.1"><Study OID="S.1">
                 <MetaDataVersion OID="MDV.1">
                   <ItemGroupDefs OID="IG.AE" Name="AE"/>
                 </MetaDataVersion>
               </Study></ODM>"#,
        )
        .expect_err("mistyped child");
        assert_eq!(
            err.to_string(),
            "unexpected <ItemGroupDefs> inside <MetaDataVersion> MDV.1"
        );

        let err = extract(
            r#"<ODM xmlns:def="http://www.cdisc.org/ns/def/v2.1"><Study OID="S.1">
                 <MetaDataVersion><def:Comment OID="COM.1"/></MetaDataVersion>
               </Study></ODM>"#,
        )
        .expect_err("mistyped define child");
        assert_eq!(
            err.to_string(),
            "unexpected <def:Comment> inside <MetaDataVersion> S.1"
        );
    }

    #[test]
    fn analysis_results_and_vendor_extensions_are_skipped() {
        let doc = extract(
            r#"<ODM xmlns:def="http://www.cdisc.org/ns/def/v2.1"
                    xmlns:arm="http://www.cdisc.org/ns/arm/v1.0"><Study OID="S.1">
                 <MetaDataVersion OID="MDV.1">
                   <def:Standards><def:Standard OID="STD.1" Name="SDTMIG"/></def:Standards>
                   <arm:AnalysisResultDisplays/>
                   <Protocol/>
                 </MetaDataVersion>
               </Study></ODM>"#,
        )
        .expect("extract");
        assert!(doc.metadata.expect("metadata").code_lists.is_empty());
    }
}
