//! Property tests: link order and key positions survive a full parse.

use std::fmt::Write as _;

use define_xml::parse_define_str;
use proptest::prelude::*;
use proptest::sample::subsequence;

const NAMES: &[&str] = &[
    "STUDYID", "DOMAIN", "USUBJID", "AESEQ", "AETERM", "AEDECOD", "AEBODSYS", "AESEV", "AESER",
    "AEACN", "AEREL", "AEOUT", "AESTDTC", "AEENDTC", "AESTDY", "AEENDY",
];

/// Distinct variable names in arbitrary order, each with an optional key sequence.
fn links() -> impl Strategy<Value = Vec<(String, Option<u32>)>> {
    subsequence(NAMES.to_vec(), 1..NAMES.len())
        .prop_shuffle()
        .prop_flat_map(|names| {
            let len = names.len();
            (
                Just(names),
                proptest::collection::vec(proptest::option::of(1u32..6), len),
            )
        })
        .prop_map(|(names, keys)| {
            names
                .into_iter()
                .map(str::to_string)
                .zip(keys)
                .collect()
        })
}

fn document(links: &[(String, Option<u32>)]) -> String {
    let mut body = String::new();
    body.push_str(r#"<ItemGroupDef OID="IG.AE" Name="AE" Repeating="Yes">"#);
    for (name, key) in links {
        let _ = write!(body, r#"<ItemRef ItemOID="IT.{name}" Mandatory="No""#);
        if let Some(key) = key {
            let _ = write!(body, r#" KeySequence="{key}""#);
        }
        body.push_str("/>");
    }
    body.push_str("</ItemGroupDef>");
    // Variables are declared in reverse so declaration order differs from link order.
    for (name, _) in links.iter().rev() {
        let _ = write!(
            body,
            r#"<ItemDef OID="IT.{name}" Name="{name}" DataType="text"/>"#
        );
    }
    format!(
        r#"<ODM xmlns="http://www.cdisc.org/ns/odm/v1.3"><Study OID="S"><MetaDataVersion OID="MDV">{body}</MetaDataVersion></Study></ODM>"#
    )
}

proptest! {
    #[test]
    fn links_keep_document_order(links in links()) {
        let doc = parse_define_str(&document(&links)).expect("parse");
        let mdv = doc.metadata_version().expect("metadata version");
        let parsed: Vec<&str> = mdv
            .links("IG.AE")
            .expect("links")
            .iter()
            .map(|link| link.item_def.name.as_str())
            .collect();
        let expected: Vec<&str> = links.iter().map(|(name, _)| name.as_str()).collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn key_position_is_one_plus_key_order_index(links in links()) {
        let doc = parse_define_str(&document(&links)).expect("parse");
        let mdv = doc.metadata_version().expect("metadata version");
        let group = mdv.item_group("IG.AE").expect("group");

        let mut keyed: Vec<(u32, &str)> = links
            .iter()
            .filter_map(|(name, key)| key.map(|key| (key, name.as_str())))
            .collect();
        keyed.sort_by_key(|(key, _)| *key);
        let key_order: Vec<String> = keyed.iter().map(|(_, name)| format!("IT.{name}")).collect();
        let parsed_order: Vec<&str> = group.key_order.iter().map(|oid| oid.as_str()).collect();
        prop_assert_eq!(&parsed_order, &key_order);

        for link in mdv.links("IG.AE").expect("links") {
            let oid = link.item_ref.item_oid.as_str();
            let expected = group
                .key_order
                .iter()
                .position(|key| key.as_str() == oid)
                .map(|index| index + 1);
            prop_assert_eq!(link.key_sequence, expected);
            prop_assert_eq!(mdv.key_position("IG.AE", oid), expected);
        }
    }
}
