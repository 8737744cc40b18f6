use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::annotation::{CommentDef, Leaf, MethodDef};
use crate::codelist::CodeList;
use crate::dataset::ItemGroupDef;
use crate::error::StructuralIssue;
use crate::ids::{EntityKind, Oid};
use crate::variable::ItemDef;

/// An entity stored in an [`Arena`], keyed by its OID.
pub trait Keyed {
    const KIND: EntityKind;

    fn oid(&self) -> &Oid;
}

impl Keyed for ItemGroupDef {
    const KIND: EntityKind = EntityKind::ItemGroupDef;

    fn oid(&self) -> &Oid {
        &self.oid
    }
}

impl Keyed for ItemDef {
    const KIND: EntityKind = EntityKind::ItemDef;

    fn oid(&self) -> &Oid {
        &self.oid
    }
}

impl Keyed for CodeList {
    const KIND: EntityKind = EntityKind::CodeList;

    fn oid(&self) -> &Oid {
        &self.oid
    }
}

impl Keyed for CommentDef {
    const KIND: EntityKind = EntityKind::Comment;

    fn oid(&self) -> &Oid {
        &self.oid
    }
}

impl Keyed for MethodDef {
    const KIND: EntityKind = EntityKind::Method;

    fn oid(&self) -> &Oid {
        &self.oid
    }
}

impl Keyed for Leaf {
    const KIND: EntityKind = EntityKind::Leaf;

    fn oid(&self) -> &Oid {
        &self.id
    }
}

/// Owned storage for one entity kind: declaration order plus an OID index.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Arena<T> {
    items: Vec<T>,
    #[serde(skip)]
    index: HashMap<Oid, usize>,
}

impl<T: Keyed> Arena<T> {
    /// Builds the index, reporting every repeated OID.
    ///
    /// The first declaration keeps the slot so lookups stay deterministic while
    /// the duplicate is reported.
    pub(crate) fn build(items: Vec<T>, issues: &mut Vec<StructuralIssue>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (slot, item) in items.iter().enumerate() {
            match index.entry(item.oid().clone()) {
                Entry::Occupied(_) => issues.push(StructuralIssue::DuplicateOid {
                    kind: T::KIND,
                    oid: item.oid().clone(),
                    scope: None,
                }),
                Entry::Vacant(entry) => {
                    entry.insert(slot);
                }
            }
        }
        Self { items, index }
    }

    pub fn get(&self, oid: &str) -> Option<&T> {
        self.slot(oid).map(|slot| &self.items[slot])
    }

    pub fn contains(&self, oid: &str) -> bool {
        self.index.contains_key(oid)
    }

    pub(crate) fn slot(&self, oid: &str) -> Option<usize> {
        self.index.get(oid).copied()
    }

    pub(crate) fn at(&self, slot: usize) -> &T {
        &self.items[slot]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Arena<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MultiLangText;

    fn leaf(id: &str, href: &str) -> Leaf {
        Leaf {
            id: Oid::new(id).expect("oid"),
            href: href.to_string(),
            title: None,
        }
    }

    #[test]
    fn keeps_declaration_order_and_indexes_by_oid() {
        let mut issues = Vec::new();
        let arena = Arena::build(
            vec![leaf("LF.B", "b.pdf"), leaf("LF.A", "a.pdf")],
            &mut issues,
        );
        assert!(issues.is_empty());
        let ids: Vec<&str> = arena.iter().map(|leaf| leaf.id.as_str()).collect();
        assert_eq!(ids, vec!["LF.B", "LF.A"]);
        assert_eq!(arena.get("LF.A").map(|leaf| leaf.href.as_str()), Some("a.pdf"));
        assert!(arena.get("LF.C").is_none());
    }

    #[test]
    fn reports_each_repeated_oid() {
        let mut issues = Vec::new();
        let comment = |oid: &str| CommentDef {
            oid: Oid::new(oid).expect("oid"),
            description: MultiLangText::plain("text"),
            documents: Vec::new(),
        };
        let arena = Arena::build(
            vec![comment("COM.1"), comment("COM.1"), comment("COM.1")],
            &mut issues,
        );
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|issue| matches!(
            issue,
            StructuralIssue::DuplicateOid { kind: EntityKind::Comment, oid, .. }
                if oid.as_str() == "COM.1"
        )));
        assert_eq!(arena.len(), 3);
    }
}
