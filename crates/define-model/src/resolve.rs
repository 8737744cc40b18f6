//! Reference resolution and model assembly.
//!
//! Assembly runs in two strict phases. First every entity kind is stored in its
//! arena, which detects duplicate OIDs. Only then are reference fields checked
//! against the completed arenas. All problems from both phases are reported
//! together; a model is returned only when there are none.

use std::collections::HashSet;

use tracing::debug;

use crate::annotation::{DocumentRef, Leaf};
use crate::error::{DefineError, Result, StructuralIssue};
use crate::ids::{EntityKind, Oid};
use crate::lookup::{Arena, Keyed};
use crate::metadata::{DatasetIndex, MetadataParts, MetadataVersion};

impl MetadataVersion {
    /// Resolves every reference in `parts` and builds the derived indices.
    ///
    /// # Errors
    ///
    /// Returns [`DefineError::Structure`] listing every duplicate OID and every
    /// reference that does not resolve.
    pub fn assemble(parts: MetadataParts) -> Result<Self> {
        let MetadataParts {
            header,
            item_groups,
            item_defs,
            code_lists,
            methods,
            comments,
            leaves,
        } = parts;

        let mut issues = Vec::new();
        let item_groups = Arena::build(item_groups, &mut issues);
        let item_defs = Arena::build(item_defs, &mut issues);
        let code_lists = Arena::build(code_lists, &mut issues);
        let methods = Arena::build(methods, &mut issues);
        let comments = Arena::build(comments, &mut issues);
        let leaves = Arena::build(leaves, &mut issues);

        let mut check = ReferenceCheck {
            issues: &mut issues,
        };

        let mut datasets = Vec::with_capacity(item_groups.len());
        for group in &item_groups {
            let mut index = DatasetIndex::default();
            let mut seen: HashSet<&Oid> = HashSet::with_capacity(group.item_refs.len());
            for item_ref in &group.item_refs {
                if !seen.insert(&item_ref.item_oid) {
                    check.issues.push(StructuralIssue::DuplicateOid {
                        kind: EntityKind::ItemRef,
                        oid: item_ref.item_oid.clone(),
                        scope: Some(group.oid.clone()),
                    });
                }
                if let Some(slot) =
                    check.slot(&item_defs, &group.oid, "ItemOID", &item_ref.item_oid)
                {
                    index.item_slots.push(slot);
                }
                check.optional(&methods, &group.oid, "MethodOID", item_ref.method_oid.as_ref());
                check.optional(
                    &code_lists,
                    &group.oid,
                    "RoleCodeListOID",
                    item_ref.role_code_list_oid.as_ref(),
                );
            }
            for (position, key_oid) in group.key_order.iter().enumerate() {
                if !seen.contains(key_oid) {
                    check.issues.push(StructuralIssue::DanglingReference {
                        kind: EntityKind::ItemRef,
                        from: group.oid.clone(),
                        attribute: "KeySequence",
                        oid: key_oid.clone(),
                    });
                    continue;
                }
                index
                    .key_positions
                    .entry(key_oid.clone())
                    .or_insert(position + 1);
            }
            check.optional(&comments, &group.oid, "def:CommentOID", group.comment_oid.as_ref());
            if let Some(location) = group.archive_location_id.as_ref() {
                match group.archive_location.as_ref() {
                    Some(leaf) if leaf.id == *location => {}
                    Some(_) => check.issues.push(StructuralIssue::DanglingReference {
                        kind: EntityKind::Leaf,
                        from: group.oid.clone(),
                        attribute: "def:ArchiveLocationID",
                        oid: location.clone(),
                    }),
                    None => {
                        check.slot(&leaves, &group.oid, "def:ArchiveLocationID", location);
                    }
                }
            }
            datasets.push(index);
        }

        for item_def in &item_defs {
            check.optional(
                &code_lists,
                &item_def.oid,
                "CodeListOID",
                item_def.code_list_oid.as_ref(),
            );
            check.optional(
                &comments,
                &item_def.oid,
                "def:CommentOID",
                item_def.comment_oid.as_ref(),
            );
            for origin in &item_def.origins {
                check.documents(&leaves, &item_def.oid, &origin.documents);
            }
        }

        for code_list in &code_lists {
            check.optional(
                &comments,
                &code_list.oid,
                "def:CommentOID",
                code_list.comment_oid.as_ref(),
            );
        }

        for method in &methods {
            check.documents(&leaves, &method.oid, &method.documents);
        }

        for comment in &comments {
            check.documents(&leaves, &comment.oid, &comment.documents);
        }

        if !issues.is_empty() {
            debug!(count = issues.len(), "metadata assembly found structural issues");
            for issue in &issues {
                debug!(%issue, "structural issue");
            }
            return Err(DefineError::Structure { issues });
        }

        let code_list_names = code_lists
            .iter()
            .map(|code_list| (code_list.oid.clone(), code_list.name.clone()))
            .collect();

        debug!(
            item_groups = item_groups.len(),
            item_defs = item_defs.len(),
            code_lists = code_lists.len(),
            methods = methods.len(),
            comments = comments.len(),
            leaves = leaves.len(),
            "assembled metadata version"
        );

        Ok(Self {
            header,
            item_groups,
            item_defs,
            code_lists,
            methods,
            comments,
            leaves,
            datasets,
            code_list_names,
        })
    }
}

struct ReferenceCheck<'a> {
    issues: &'a mut Vec<StructuralIssue>,
}

impl ReferenceCheck<'_> {
    fn slot<T: Keyed>(
        &mut self,
        target: &Arena<T>,
        from: &Oid,
        attribute: &'static str,
        oid: &Oid,
    ) -> Option<usize> {
        let slot = target.slot(oid.as_str());
        if slot.is_none() {
            self.issues.push(StructuralIssue::DanglingReference {
                kind: T::KIND,
                from: from.clone(),
                attribute,
                oid: oid.clone(),
            });
        }
        slot
    }

    fn optional<T: Keyed>(
        &mut self,
        target: &Arena<T>,
        from: &Oid,
        attribute: &'static str,
        oid: Option<&Oid>,
    ) {
        if let Some(oid) = oid {
            self.slot(target, from, attribute, oid);
        }
    }

    fn documents(&mut self, leaves: &Arena<Leaf>, from: &Oid, documents: &[DocumentRef]) {
        for document in documents {
            self.slot(leaves, from, "leafID", &document.leaf_id);
        }
    }
}
