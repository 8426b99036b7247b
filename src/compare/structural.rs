use std::fmt;

use serde::Serialize;

use super::canonical::fields_of;
use super::CanonicalTree;
use crate::ast::SelectionSetExtension;
use crate::static_graphql::query::{Field, SelectionSet};

/// First difference found between two canonical trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StructuralMismatch {
    /// Sorted field names of the selection sets at `path` differ.
    FieldNames {
        path: Vec<String>,
        left: Vec<String>,
        right: Vec<String>,
    },
    /// `field` selects sub-fields on one side and is a leaf on the other.
    SelectionSetPresence {
        path: Vec<String>,
        field: String,
        left_has_selection_set: bool,
    },
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralMismatch::FieldNames { path, left, right } => write!(
                f,
                "Field name mismatch at {}: [{}] vs [{}]",
                display_path(path),
                left.join(", "),
                right.join(", ")
            ),
            StructuralMismatch::SelectionSetPresence {
                path,
                field,
                left_has_selection_set,
            } => {
                let (with, without) = if *left_has_selection_set {
                    ("left", "right")
                } else {
                    ("right", "left")
                };
                let mut field_path = path.clone();
                field_path.push(field.clone());

                write!(
                    f,
                    "Selection set mismatch at {}: {} selects sub-fields, {} does not",
                    display_path(&field_path),
                    with,
                    without
                )
            }
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

struct PairedSelectionSets<'a> {
    path: Vec<String>,
    left: &'a SelectionSet,
    right: &'a SelectionSet,
}

/// Walks both trees in lockstep and returns the first difference, if any.
///
/// Two trees are equivalent when each level holds the same field names (order,
/// aliases, arguments and directives are ignored) and fields paired by sorted name
/// both select sub-fields, recursively equivalent, or are both leaves.
pub fn find_structural_mismatch(
    left: &CanonicalTree,
    right: &CanonicalTree,
) -> Option<StructuralMismatch> {
    let mut work_list = vec![PairedSelectionSets {
        path: Vec::new(),
        left: left.selection_set(),
        right: right.selection_set(),
    }];

    while let Some(PairedSelectionSets { path, left, right }) = work_list.pop() {
        let left_fields = sorted_fields(left);
        let right_fields = sorted_fields(right);

        let same_names = left_fields.len() == right_fields.len()
            && left_fields
                .iter()
                .zip(&right_fields)
                .all(|(l, r)| l.name == r.name);

        if !same_names {
            let mismatch = StructuralMismatch::FieldNames {
                path,
                left: names(&left_fields),
                right: names(&right_fields),
            };
            tracing::debug!(%mismatch, "canonical trees differ");

            return Some(mismatch);
        }

        for (l, r) in left_fields.iter().copied().zip(right_fields.iter().copied()) {
            let left_has_selection_set = !l.selection_set.is_leaf();
            let right_has_selection_set = !r.selection_set.is_leaf();

            if left_has_selection_set != right_has_selection_set {
                let mismatch = StructuralMismatch::SelectionSetPresence {
                    path,
                    field: l.name.clone(),
                    left_has_selection_set,
                };
                tracing::debug!(%mismatch, "canonical trees differ");

                return Some(mismatch);
            }

            if left_has_selection_set {
                let mut child_path = path.clone();
                child_path.push(l.name.clone());

                work_list.push(PairedSelectionSets {
                    path: child_path,
                    left: &l.selection_set,
                    right: &r.selection_set,
                });
            }
        }
    }

    None
}

pub fn are_structurally_equivalent(left: &CanonicalTree, right: &CanonicalTree) -> bool {
    find_structural_mismatch(left, right).is_none()
}

/// Stable, so fields sharing a name after fragment merging keep their order.
fn sorted_fields(selection_set: &SelectionSet) -> Vec<&Field> {
    let mut fields = fields_of(selection_set).collect::<Vec<_>>();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    fields
}

fn names(fields: &[&Field]) -> Vec<String> {
    fields.iter().map(|field| field.name.clone()).collect()
}

#[test]
fn equivalence_is_reflexive() {
    use crate::compare::test_utils::*;

    let tree = canonical("{ a { b c { d } } e }");
    assert!(are_structurally_equivalent(&tree, &tree));
}

#[test]
fn field_order_is_ignored() {
    use crate::compare::test_utils::*;

    let left = canonical("{ a { x y } b }");
    let right = canonical("{ b a { y x } }");

    assert_eq!(find_structural_mismatch(&left, &right), None);
}

#[test]
fn arguments_aliases_and_directives_are_ignored() {
    use crate::compare::test_utils::*;

    let left = canonical("{ x: a(id: 1) @include(if: true) }");
    let right = canonical("{ y: a(id: 2) }");

    assert!(are_structurally_equivalent(&left, &right));
}

#[test]
fn nested_selection_against_leaf() {
    use crate::compare::test_utils::*;

    let nested = canonical("{ a { b } }");
    let leaf = canonical("{ a }");

    assert_eq!(
        find_structural_mismatch(&nested, &leaf),
        Some(StructuralMismatch::SelectionSetPresence {
            path: vec![],
            field: "a".to_string(),
            left_has_selection_set: true,
        })
    );
    assert_eq!(
        find_structural_mismatch(&leaf, &nested),
        Some(StructuralMismatch::SelectionSetPresence {
            path: vec![],
            field: "a".to_string(),
            left_has_selection_set: false,
        })
    );
}

#[test]
fn different_field_count() {
    use crate::compare::test_utils::*;

    let left = canonical("{ a b }");
    let right = canonical("{ a }");

    assert_eq!(
        find_structural_mismatch(&left, &right),
        Some(StructuralMismatch::FieldNames {
            path: vec![],
            left: vec!["a".to_string(), "b".to_string()],
            right: vec!["a".to_string()],
        })
    );
}

#[test]
fn nested_mismatch_reports_path() {
    use crate::compare::test_utils::*;

    let left = canonical("{ user { profile { name } } other }");
    let right = canonical("{ other user { profile { email } } }");

    let mismatch = find_structural_mismatch(&left, &right).expect("trees should differ");
    assert_eq!(
        mismatch,
        StructuralMismatch::FieldNames {
            path: vec!["user".to_string(), "profile".to_string()],
            left: vec!["name".to_string()],
            right: vec!["email".to_string()],
        }
    );
    assert_eq!(
        mismatch.to_string(),
        "Field name mismatch at user.profile: [name] vs [email]"
    );
}

#[test]
fn duplicate_names_are_tolerated() {
    use crate::compare::test_utils::*;

    let left = canonical(
        "{ a ...F }
        fragment F on T { a }",
    );
    let right = canonical("{ a a }");
    let single = canonical("{ a }");

    assert!(are_structurally_equivalent(&left, &right));
    assert!(!are_structurally_equivalent(&left, &single));
}

#[test]
fn duplicate_names_are_paired_in_source_order() {
    use crate::compare::test_utils::*;

    let left = canonical("{ a { x } a { y } }");
    let right = canonical("{ a { y } a { x } }");

    assert!(!are_structurally_equivalent(&left, &right));
}

#[test]
fn selection_set_mismatch_message() {
    let mismatch = StructuralMismatch::SelectionSetPresence {
        path: vec!["user".to_string()],
        field: "friends".to_string(),
        left_has_selection_set: false,
    };

    assert_eq!(
        mismatch.to_string(),
        "Selection set mismatch at user.friends: right selects sub-fields, left does not"
    );
    assert_eq!(
        serde_json::to_value(&mismatch).expect("failed to serialize"),
        serde_json::json!({
            "kind": "selectionSetPresence",
            "path": ["user"],
            "field": "friends",
            "leftHasSelectionSet": false,
        })
    );
}
