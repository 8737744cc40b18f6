//! Tabular listings built from a resolved metadata version.
//!
//! Each listing is plain text cells so the binary can style them and tests
//! can compare them directly.

use define_model::{CodeList, CodeListKind, ItemGroupDef, Link, MetadataVersion, Oid};

use crate::filter::NameFilter;

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Language tag used to pick among several description variants.
    pub lang: Option<String>,
    pub extended: bool,
    pub filter: Option<NameFilter>,
}

impl ReportOptions {
    fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    fn keeps(&self, name: &str) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.matches(name))
    }
}

/// Which part of the codes listing to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExternalCodes {
    #[default]
    Show,
    Hide,
    Only,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cells of the named column, top to bottom.
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|name| *name == header)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map_or("", String::as_str))
                .collect(),
        )
    }
}

/// Codes listing: coded values, and external dictionaries in their own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReports {
    pub coded: Report,
    pub external: Report,
}

pub fn datasets(mdv: &MetadataVersion, options: &ReportOptions) -> Report {
    let mut headers = vec!["Name", "Label", "Domain"];
    if options.extended {
        headers.extend([
            "SAS Name",
            "Repeating",
            "IsReferenceData",
            "Purpose",
            "Structure",
            "Class",
            "Comment",
        ]);
    }
    let mut report = Report::new(headers);
    for group in mdv.item_groups() {
        if !options.keeps(&group.name) {
            continue;
        }
        let mut row = vec![
            group.name.clone(),
            text(group.label(options.lang())),
            text(group.domain.as_deref()),
        ];
        if options.extended {
            row.extend([
                text(group.alternate_name.as_deref()),
                yes_no(group.repeating),
                text(group.is_reference_data.map(yes_no).as_deref()),
                text(group.purpose.as_deref()),
                text(group.structure.as_deref()),
                text(group.class_name.as_deref()),
                comment_text(mdv, group.comment_oid.as_ref(), options),
            ]);
        }
        report.rows.push(row);
    }
    report
}

pub fn variables(mdv: &MetadataVersion, options: &ReportOptions) -> Report {
    let mut headers = vec![
        "Dataset",
        "Name",
        "Label",
        "Length",
        "DataType",
        "DisplayFormat",
        "Codelist",
        "KeySequence",
    ];
    if options.extended {
        headers.extend([
            "Origin",
            "Origin Description",
            "Method",
            "Comment",
            "Mandatory",
            "Role",
            "SAS Field Name",
        ]);
    }
    let mut report = Report::new(headers);
    for group in mdv.item_groups() {
        if !options.keeps(&group.name) {
            continue;
        }
        for link in dataset_links(mdv, group) {
            let item = link.item_def;
            let mut row = vec![
                group.name.clone(),
                item.name.clone(),
                text(item.label(options.lang())),
                text(item.length.map(|length| length.to_string()).as_deref()),
                item.data_type.clone(),
                text(item.display_format.as_deref()),
                text(
                    item.code_list_oid
                        .as_ref()
                        .and_then(|oid| mdv.code_list_name(oid.as_str())),
                ),
                text(link.key_sequence.map(|key| key.to_string()).as_deref()),
            ];
            if options.extended {
                let origin = item.primary_origin();
                row.extend([
                    text(origin.map(|origin| origin.origin_type.as_str())),
                    text(origin.and_then(|origin| origin.description.resolve(options.lang()))),
                    text(
                        link.item_ref
                            .method_oid
                            .as_ref()
                            .and_then(|oid| mdv.method(oid.as_str()))
                            .and_then(|method| method.description.resolve(options.lang())),
                    ),
                    comment_text(mdv, item.comment_oid.as_ref(), options),
                    yes_no(link.item_ref.mandatory),
                    text(link.item_ref.role.as_deref()),
                    text(item.field_name.as_deref()),
                ]);
            }
            report.rows.push(row);
        }
    }
    report
}

pub fn code_lists(mdv: &MetadataVersion, options: &ReportOptions) -> Report {
    let mut headers = vec!["Name", "DataType", "Kind"];
    if options.extended {
        headers.extend(["SAS Format Name", "Alias"]);
    }
    let mut report = Report::new(headers);
    for code_list in mdv.code_lists() {
        if !options.keeps(&code_list.name) {
            continue;
        }
        let mut row = vec![
            code_list.name.clone(),
            code_list.data_type.clone(),
            code_list.kind().to_string(),
        ];
        if options.extended {
            row.extend([
                text(code_list.format_name.as_deref()),
                text(code_list.alias().map(|alias| alias.name.as_str())),
            ]);
        }
        report.rows.push(row);
    }
    report
}

pub fn codes(mdv: &MetadataVersion, options: &ReportOptions, external: ExternalCodes) -> CodeReports {
    let mut coded_headers = vec!["Codelist", "CodedValue", "Decode"];
    if options.extended {
        coded_headers.extend(["Rank", "Alias", "ExtendedValue"]);
    }
    let mut reports = CodeReports {
        coded: Report::new(coded_headers),
        external: Report::new(vec!["Codelist", "Dictionary", "Version", "ref", "href"]),
    };

    for code_list in mdv.code_lists() {
        if !options.keeps(&code_list.name) {
            continue;
        }
        match code_list.kind() {
            CodeListKind::External if external != ExternalCodes::Hide => {
                push_external(&mut reports.external, code_list);
            }
            CodeListKind::Decoded | CodeListKind::Enumerated if external != ExternalCodes::Only => {
                push_coded(&mut reports.coded, code_list, options);
            }
            _ => {}
        }
    }
    reports
}

fn push_coded(report: &mut Report, code_list: &CodeList, options: &ReportOptions) {
    for code in code_list.coded_values() {
        let mut row = vec![
            code_list.name.clone(),
            code.value.to_string(),
            text(code.decode),
        ];
        if options.extended {
            row.extend([
                text(code.rank.map(|rank| rank.to_string()).as_deref()),
                text(code_list.alias().map(|alias| alias.name.as_str())),
                if code.extended_value {
                    "Yes".to_string()
                } else {
                    String::new()
                },
            ]);
        }
        report.rows.push(row);
    }
}

fn push_external(report: &mut Report, code_list: &CodeList) {
    let Some(external) = code_list.external() else {
        return;
    };
    report.rows.push(vec![
        code_list.name.clone(),
        text(external.dictionary.as_deref()),
        text(external.version.as_deref()),
        text(external.reference.as_deref()),
        text(external.href.as_deref()),
    ]);
}

fn dataset_links<'a>(
    mdv: &'a MetadataVersion,
    group: &ItemGroupDef,
) -> Vec<Link<'a>> {
    mdv.links(group.oid.as_str()).unwrap_or_default()
}

fn comment_text(
    mdv: &MetadataVersion,
    oid: Option<&Oid>,
    options: &ReportOptions,
) -> String {
    text(
        oid.and_then(|oid| mdv.comment(oid.as_str()))
            .and_then(|comment| comment.description.resolve(options.lang())),
    )
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn yes_no(value: bool) -> String {
    let flag = if value { "Yes" } else { "No" };
    flag.to_string()
}
