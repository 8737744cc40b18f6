//! Controlled and external vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::Oid;
use crate::text::{Alias, MultiLangText};

/// Which of the mutually exclusive content shapes a codelist carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeListKind {
    Enumerated,
    Decoded,
    External,
}

impl CodeListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enumerated => "enumerated",
            Self::Decoded => "decoded",
            Self::External => "external",
        }
    }
}

impl fmt::Display for CodeListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coded value paired with a decode (`CodeListItem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeListItem {
    pub coded_value: String,
    pub rank: Option<f64>,
    pub order_number: Option<u32>,
    /// `def:ExtendedValue="Yes"`: the term extends the published terminology.
    pub extended_value: bool,
    pub decode: MultiLangText,
    pub aliases: Vec<Alias>,
}

impl CodeListItem {
    /// The decode, present only when exactly one decode text is declared.
    pub fn decode(&self) -> Option<&str> {
        self.decode.single()
    }

    pub fn alias(&self) -> Option<&Alias> {
        self.aliases.first()
    }
}

/// A bare coded value (`EnumeratedItem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumeratedItem {
    pub coded_value: String,
    pub rank: Option<f64>,
    pub order_number: Option<u32>,
    pub extended_value: bool,
    pub aliases: Vec<Alias>,
}

/// Pointer to a vocabulary maintained outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCodeList {
    pub dictionary: Option<String>,
    pub version: Option<String>,
    pub reference: Option<String>,
    pub href: Option<String>,
}

/// Codelist content, one shape per codelist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum CodeListContent {
    Enumerated(Vec<EnumeratedItem>),
    Decoded(Vec<CodeListItem>),
    External(ExternalCodeList),
}

impl CodeListContent {
    pub fn kind(&self) -> CodeListKind {
        match self {
            Self::Enumerated(_) => CodeListKind::Enumerated,
            Self::Decoded(_) => CodeListKind::Decoded,
            Self::External(_) => CodeListKind::External,
        }
    }
}

/// A codelist (`CodeList`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeList {
    pub oid: Oid,
    pub name: String,
    pub data_type: String,
    /// `SASFormatName`.
    pub format_name: Option<String>,
    pub is_non_standard: bool,
    pub standard_oid: Option<String>,
    pub comment_oid: Option<Oid>,
    pub description: MultiLangText,
    pub content: CodeListContent,
    pub aliases: Vec<Alias>,
}

impl CodeList {
    pub fn kind(&self) -> CodeListKind {
        self.content.kind()
    }

    pub fn alias(&self) -> Option<&Alias> {
        self.aliases.first()
    }

    pub fn external(&self) -> Option<&ExternalCodeList> {
        match &self.content {
            CodeListContent::External(external) => Some(external),
            _ => None,
        }
    }

    /// Coded values in declaration order. External codelists have none.
    pub fn coded_values(&self) -> Vec<CodedValue<'_>> {
        match &self.content {
            CodeListContent::Decoded(items) => items
                .iter()
                .map(|item| CodedValue {
                    value: &item.coded_value,
                    decode: item.decode(),
                    rank: item.rank,
                    extended_value: item.extended_value,
                    alias: item.alias(),
                })
                .collect(),
            CodeListContent::Enumerated(items) => items
                .iter()
                .map(|item| CodedValue {
                    value: &item.coded_value,
                    decode: None,
                    rank: item.rank,
                    extended_value: item.extended_value,
                    alias: item.aliases.first(),
                })
                .collect(),
            CodeListContent::External(_) => Vec::new(),
        }
    }

    /// Looks up the decode for a coded value (exact match).
    pub fn decode_of(&self, coded_value: &str) -> Option<&str> {
        match &self.content {
            CodeListContent::Decoded(items) => items
                .iter()
                .find(|item| item.coded_value == coded_value)
                .and_then(CodeListItem::decode),
            _ => None,
        }
    }
}

/// A read-only view of one coded value, independent of codelist kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodedValue<'a> {
    pub value: &'a str,
    pub decode: Option<&'a str>,
    pub rank: Option<f64>,
    pub extended_value: bool,
    pub alias: Option<&'a Alias>,
}
