//! Entity extractors.
//!
//! Each extractor walks one known element and copies its attributes and
//! children into a model record. References stay raw OIDs; nothing is checked
//! against other entities until assembly.

mod annotation;
mod codelist;
mod dataset;
mod study;
mod text;
mod variable;

use std::str::FromStr;

use define_model::{DefineError, Oid, Result};
use tracing::trace;

use crate::document::{Element, XML_NAMESPACE};

pub use study::{ExtractedDocument, extract_document};

pub const ODM_NAMESPACE: &str = "http://www.cdisc.org/ns/odm/v1.3";
pub const DEF_NAMESPACE_V20: &str = "http://www.cdisc.org/ns/def/v2.0";
pub const DEF_NAMESPACE_V21: &str = "http://www.cdisc.org/ns/def/v2.1";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Namespaces the extractors recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ns {
    /// ODM 1.3, or no namespace at all.
    Odm,
    /// Define-XML 2.0 or 2.1 extensions.
    Def,
    Xlink,
    Xml,
}

impl Ns {
    fn matches(self, uri: Option<&str>) -> bool {
        match self {
            Self::Odm => matches!(uri, None | Some(ODM_NAMESPACE)),
            Self::Def => matches!(uri, Some(DEF_NAMESPACE_V20 | DEF_NAMESPACE_V21)),
            Self::Xlink => uri == Some(XLINK_NAMESPACE),
            Self::Xml => uri == Some(XML_NAMESPACE),
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Odm => "",
            Self::Def => "def:",
            Self::Xlink => "xlink:",
            Self::Xml => "xml:",
        }
    }
}

/// An attribute name as written in Define-XML.
///
/// ODM attributes are unqualified; extension attributes carry a namespace.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Attr {
    ns: Option<Ns>,
    local: &'static str,
}

impl Attr {
    pub(crate) const fn plain(local: &'static str) -> Self {
        Self { ns: None, local }
    }

    pub(crate) const fn def(local: &'static str) -> Self {
        Self {
            ns: Some(Ns::Def),
            local,
        }
    }

    pub(crate) const fn xlink(local: &'static str) -> Self {
        Self {
            ns: Some(Ns::Xlink),
            local,
        }
    }

    pub(crate) const fn xml(local: &'static str) -> Self {
        Self {
            ns: Some(Ns::Xml),
            local,
        }
    }

    fn display(self) -> String {
        match self.ns {
            Some(ns) => format!("{}{}", ns.prefix(), self.local),
            None => self.local.to_string(),
        }
    }
}

/// Schema-aware accessors over the generic tree.
pub(crate) trait ElementExt {
    fn is(&self, ns: Ns, local: &str) -> bool;

    /// Tag as written with its conventional prefix, for messages.
    fn tag(&self) -> String;

    /// Whether the element belongs to a namespace this crate models.
    fn is_known(&self) -> bool;

    fn children_named(&self, ns: Ns, local: &'static str) -> impl Iterator<Item = &Element>;

    fn child(&self, ns: Ns, local: &'static str) -> Option<&Element> {
        self.children_named(ns, local).next()
    }

    fn get(&self, attr: Attr) -> Option<&str>;

    fn string(&self, attr: Attr) -> Option<String> {
        self.get(attr).map(str::to_string)
    }

    fn required(&self, attr: Attr) -> Result<&str>;

    fn oid(&self, attr: Attr) -> Result<Option<Oid>>;

    fn required_oid(&self, attr: Attr) -> Result<Oid>;

    /// A `Yes`/`No` attribute.
    fn flag(&self, attr: Attr) -> Result<Option<bool>>;

    fn number<T: FromStr>(&self, attr: Attr) -> Result<Option<T>>;

    /// Trimmed direct text, `None` when blank.
    fn trimmed_text(&self) -> Option<String>;
}

impl ElementExt for Element {
    fn is(&self, ns: Ns, local: &str) -> bool {
        self.name.local == local && ns.matches(self.name.namespace.as_deref())
    }

    fn tag(&self) -> String {
        let ns = [Ns::Def, Ns::Xlink, Ns::Xml]
            .into_iter()
            .find(|ns| ns.matches(self.name.namespace.as_deref()));
        match ns {
            Some(ns) => format!("{}{}", ns.prefix(), self.name.local),
            None if Ns::Odm.matches(self.name.namespace.as_deref()) => self.name.local.clone(),
            None => self.name.to_string(),
        }
    }

    fn is_known(&self) -> bool {
        let namespace = self.name.namespace.as_deref();
        Ns::Odm.matches(namespace) || Ns::Def.matches(namespace)
    }

    fn children_named(&self, ns: Ns, local: &'static str) -> impl Iterator<Item = &Element> {
        self.elements().filter(move |child| child.is(ns, local))
    }

    fn get(&self, attr: Attr) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| {
                attribute.name.local == attr.local
                    && match attr.ns {
                        None => attribute.name.namespace.is_none(),
                        Some(ns) => ns.matches(attribute.name.namespace.as_deref()),
                    }
            })
            .map(|attribute| attribute.value.as_str())
    }

    fn required(&self, attr: Attr) -> Result<&str> {
        self.get(attr).ok_or_else(|| DefineError::MissingAttribute {
            element: self.tag(),
            attribute: attr.display(),
        })
    }

    fn oid(&self, attr: Attr) -> Result<Option<Oid>> {
        self.get(attr)
            .map(|value| Oid::new(value).map_err(|_| invalid(self, attr, value)))
            .transpose()
    }

    fn required_oid(&self, attr: Attr) -> Result<Oid> {
        let value = self.required(attr)?;
        Oid::new(value).map_err(|_| invalid(self, attr, value))
    }

    fn flag(&self, attr: Attr) -> Result<Option<bool>> {
        self.get(attr)
            .map(|value| match value.trim() {
                "Yes" => Ok(true),
                "No" => Ok(false),
                _ => Err(invalid(self, attr, value)),
            })
            .transpose()
    }

    fn number<T: FromStr>(&self, attr: Attr) -> Result<Option<T>> {
        self.get(attr)
            .map(|value| value.trim().parse().map_err(|_| invalid(self, attr, value)))
            .transpose()
    }

    fn trimmed_text(&self) -> Option<String> {
        let text = self.text();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Handles a child the caller does not model.
///
/// Children listed in `known` are schema elements this crate does not read,
/// and elements outside the ODM and `def:` namespaces are vendor extensions.
/// Both are skipped. Anything else in a modelled namespace is an error.
pub(crate) fn skip_child(
    parent: &Element,
    oid: &Oid,
    child: &Element,
    known: &[(Ns, &'static str)],
) -> Result<()> {
    if child.is_known() && !known.iter().any(|&(ns, local)| child.is(ns, local)) {
        return Err(unexpected(parent, oid, child));
    }
    trace!(parent = %parent.tag(), %oid, element = %child.tag(), "skipping element");
    Ok(())
}

pub(crate) fn unexpected(parent: &Element, oid: &Oid, child: &Element) -> DefineError {
    DefineError::UnexpectedElement {
        parent: parent.tag(),
        oid: oid.clone(),
        element: child.tag(),
    }
}

fn invalid(element: &Element, attr: Attr, value: &str) -> DefineError {
    DefineError::InvalidValue {
        element: element.tag(),
        attribute: attr.display(),
        value: value.to_string(),
    }
}
