//! Comments, methods, and the document leaves they point into.

use serde::{Deserialize, Serialize};

use crate::ids::Oid;
use crate::text::MultiLangText;

/// An external document declared with `def:leaf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: Oid,
    /// Target of `xlink:href`.
    pub href: String,
    pub title: Option<String>,
}

/// Page reference block inside a document reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfPageRef {
    /// `PhysicalRef` or `NamedDestination`.
    pub page_type: String,
    pub page_refs: Option<String>,
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
}

/// A `def:DocumentRef` pointing at a [`Leaf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub leaf_id: Oid,
    pub pages: Vec<PdfPageRef>,
}

/// A `def:CommentDef`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDef {
    pub oid: Oid,
    pub description: MultiLangText,
    pub documents: Vec<DocumentRef>,
}

/// A `FormalExpression` attached to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalExpression {
    pub context: Option<String>,
    pub expression: String,
}

/// A `MethodDef` describing how a value is derived or imputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub oid: Oid,
    pub name: String,
    /// `Computation` or `Imputation`.
    pub method_type: String,
    pub description: MultiLangText,
    pub documents: Vec<DocumentRef>,
    pub expressions: Vec<FormalExpression>,
}
