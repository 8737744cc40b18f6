//! Define-XML metadata model.
//!
//! Entity records for datasets, variables, codelists, comments, methods, and
//! document leaves, stored per kind in OID-keyed arenas. Records reference each
//! other by [`Oid`] only; [`MetadataVersion::assemble`] checks that every such
//! reference resolves before handing out an immutable [`MetadataVersion`].

pub mod annotation;
pub mod codelist;
pub mod dataset;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod metadata;
mod resolve;
pub mod study;
pub mod text;
pub mod variable;

pub use annotation::{CommentDef, DocumentRef, FormalExpression, Leaf, MethodDef, PdfPageRef};
pub use codelist::{
    CodeList, CodeListContent, CodeListItem, CodeListKind, CodedValue, EnumeratedItem,
    ExternalCodeList,
};
pub use dataset::{ItemGroupDef, ItemRef};
pub use error::{CodeListShape, DefineError, Result, StructuralIssue};
pub use ids::{EntityKind, Oid};
pub use lookup::{Arena, Keyed};
pub use metadata::{Link, MetadataHeader, MetadataParts, MetadataVersion};
pub use study::{DefineDocument, GlobalVariables, OdmHeader, Study};
pub use text::{Alias, MultiLangText, TranslatedText};
pub use variable::{ItemDef, Origin};
