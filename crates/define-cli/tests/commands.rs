//! Listing reports over a Define-XML file on disk.

use std::fs;
use std::path::PathBuf;

use define_cli::{ExternalCodes, NameFilter, ReportOptions, load_document, report};
use define_model::DefineDocument;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../define-xml/tests/fixtures/define_small.xml");

fn write_fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("define.xml");
    fs::write(&path, FIXTURE).expect("write fixture");
    path
}

fn load() -> DefineDocument {
    let dir = TempDir::new().expect("temp dir");
    let path = write_fixture(&dir);
    load_document(&path, "UTF-8").expect("load document")
}

fn options(filter: Option<&str>, lang: Option<&str>, extended: bool) -> ReportOptions {
    ReportOptions {
        lang: lang.map(str::to_string),
        extended,
        filter: filter.map(|pattern| NameFilter::new(pattern).expect("filter")),
    }
}

#[test]
fn datasets_listing_resolves_labels_by_language() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let plain = report::datasets(mdv, &ReportOptions::default());
    assert_eq!(plain.column("Name"), Some(vec!["DM", "AE"]));
    // AE carries two translations and no language was requested.
    assert_eq!(plain.column("Label"), Some(vec!["Demographics", ""]));
    assert_eq!(plain.column("Class"), None);

    let french = report::datasets(mdv, &options(None, Some("FR"), false));
    assert_eq!(
        french.column("Label"),
        Some(vec!["Demographics", "Événements indésirables"])
    );
}

#[test]
fn extended_datasets_listing_adds_attributes() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let listing = report::datasets(mdv, &options(Some("'^ae$'"), None, true));
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.column("Repeating"), Some(vec!["Yes"]));
    assert_eq!(listing.column("Class"), Some(vec!["EVENTS"]));
    assert_eq!(
        listing.column("Comment"),
        Some(vec!["See the reviewer guide for AE handling."])
    );
}

#[test]
fn variables_follow_dataset_order_with_key_positions() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let listing = report::variables(mdv, &options(Some("^AE$"), None, false));
    assert_eq!(
        listing.column("Name"),
        Some(vec!["STUDYID", "USUBJID", "AETERM", "AESEQ", "AEDECOD", "AESEV"])
    );
    assert_eq!(
        listing.column("KeySequence"),
        Some(vec!["1", "2", "", "4", "3", ""])
    );
    assert_eq!(
        listing.column("Codelist"),
        Some(vec![
            "",
            "",
            "",
            "",
            "Adverse Event Dictionary",
            "Severity/Intensity Scale for Adverse Events",
        ])
    );
}

#[test]
fn extended_variables_listing_resolves_methods_and_comments() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let listing = report::variables(mdv, &options(Some("ae"), None, true));
    let names = listing.column("Name").expect("names");
    let methods = listing.column("Method").expect("methods");
    let comments = listing.column("Comment").expect("comments");
    let origins = listing.column("Origin").expect("origins");

    let aeseq = names.iter().position(|name| *name == "AESEQ").expect("AESEQ");
    assert_eq!(
        methods[aeseq],
        "Sequential number identifying records within each USUBJID."
    );
    let aedecod = names.iter().position(|name| *name == "AEDECOD").expect("AEDECOD");
    assert_eq!(comments[aedecod], "Coded with MedDRA.");
    assert_eq!(origins[aedecod], "Assigned");
    assert_eq!(listing.column("Mandatory").expect("mandatory")[aedecod], "No");
}

#[test]
fn codelists_listing_reports_kind() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let listing = report::code_lists(mdv, &options(None, None, true));
    assert_eq!(
        listing.column("Kind"),
        Some(vec!["enumerated", "decoded", "external"])
    );
    assert_eq!(listing.column("Alias"), Some(vec!["C66731", "", ""]));
    assert_eq!(
        listing.column("SAS Format Name"),
        Some(vec!["$SEX", "$AESEV", ""])
    );
}

#[test]
fn codes_listing_splits_external_dictionaries() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let all = report::codes(mdv, &options(None, None, true), ExternalCodes::Show);
    assert_eq!(
        all.coded.column("CodedValue"),
        Some(vec!["F", "M", "U", "MILD", "MODERATE", "SEVERE"])
    );
    assert_eq!(
        all.coded.column("Decode"),
        Some(vec!["", "", "", "Mild", "Moderate", "Severe"])
    );
    assert_eq!(
        all.coded.column("ExtendedValue"),
        Some(vec!["", "", "", "", "", "Yes"])
    );
    // Alias is the codelist's, not the item's own NCI code.
    assert_eq!(
        all.coded.column("Alias"),
        Some(vec!["C66731", "C66731", "C66731", "", "", ""])
    );
    assert_eq!(all.external.column("Dictionary"), Some(vec!["MEDDRA"]));
    assert_eq!(all.external.column("Version"), Some(vec!["26.0"]));

    let hidden = report::codes(mdv, &ReportOptions::default(), ExternalCodes::Hide);
    assert_eq!(hidden.coded.len(), 6);
    assert!(hidden.external.is_empty());

    let only = report::codes(mdv, &ReportOptions::default(), ExternalCodes::Only);
    assert!(only.coded.is_empty());
    assert_eq!(only.external.len(), 1);
}

#[test]
fn codes_listing_honours_the_name_filter() {
    let document = load();
    let mdv = document.metadata_version().expect("metadata version");

    let listing = report::codes(mdv, &options(Some("^sex$"), None, false), ExternalCodes::Show);
    assert_eq!(listing.coded.column("Codelist"), Some(vec!["Sex", "Sex", "Sex"]));
    assert!(listing.external.is_empty());
}

#[test]
fn missing_file_reports_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.xml");
    let error = load_document(&path, "UTF-8").expect_err("missing file");
    assert!(format!("{error:#}").contains("absent.xml"));
}

#[test]
fn unknown_encoding_label_fails_to_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_fixture(&dir);
    let error = load_document(&path, "no-such-charset").expect_err("bad label");
    assert!(format!("{error:#}").contains("no-such-charset"));
}
