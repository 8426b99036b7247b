use graphql_parser::query::parse_query;
use serde::Serialize;
use serde_with::skip_serializing_none;

use super::{find_structural_mismatch, CanonicalTree, CompareError, StructuralMismatch};
use crate::static_graphql::query::Document;

/// Outcome of comparing two documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Comparison {
    /// At least one document has no query operation, nothing was compared.
    Skipped { reason: String },
    Compared(ComparisonReport),
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub left: CanonicalTree,
    pub right: CanonicalTree,
    pub equivalent: bool,
    pub mismatch: Option<StructuralMismatch>,
}

impl Comparison {
    /// `None` when the comparison was skipped.
    pub fn is_equivalent(&self) -> Option<bool> {
        match self {
            Comparison::Skipped { .. } => None,
            Comparison::Compared(report) => Some(report.equivalent),
        }
    }
}

pub fn parse_document(source: &str, document_name: &str) -> Result<Document, CompareError> {
    parse_query::<String>(source)
        .map(|document| document.into_static())
        .map_err(|error| CompareError::Parse {
            document: document_name.to_string(),
            source: error,
        })
}

pub fn compare_documents(left: &Document, right: &Document) -> Result<Comparison, CompareError> {
    let left_tree = CanonicalTree::from_document(left)?;
    let right_tree = CanonicalTree::from_document(right)?;

    let (left, right) = match (left_tree, right_tree) {
        (Some(left), Some(right)) => (left, right),
        (left, right) => {
            let missing = match (left.is_none(), right.is_none()) {
                (true, true) => "both documents",
                (true, false) => "the left document",
                _ => "the right document",
            };

            return Ok(Comparison::Skipped {
                reason: format!("no query operation in {}", missing),
            });
        }
    };

    let mismatch = find_structural_mismatch(&left, &right);

    Ok(Comparison::Compared(ComparisonReport {
        equivalent: mismatch.is_none(),
        left,
        right,
        mismatch,
    }))
}

/// Parses both sources and compares them.
pub fn compare_queries(left: &str, right: &str) -> Result<Comparison, CompareError> {
    let left = parse_document(left, "left document")?;
    let right = parse_document(right, "right document")?;

    compare_documents(&left, &right)
}

#[test]
fn fragment_refactor_is_equivalent() {
    let comparison = compare_queries(
        "query { user { id name } }",
        "query { user { ...Fields } }
        fragment Fields on User { name id }",
    )
    .expect("comparison failed");

    match comparison {
        Comparison::Compared(report) => {
            assert!(report.equivalent);
            assert_eq!(report.mismatch, None);
            assert_eq!(report.left.levels(), vec!["user", "id name"]);
            assert_eq!(report.right.levels(), vec!["user", "name id"]);
        }
        other => panic!("unexpected comparison: {:?}", other),
    }
}

#[test]
fn changed_fragment_is_not_equivalent() {
    let comparison = compare_queries(
        "query { user { id name } }",
        "query { user { ...Fields } }
        fragment Fields on User { name email }",
    )
    .expect("comparison failed");

    assert_eq!(comparison.is_equivalent(), Some(false));
    match comparison {
        Comparison::Compared(report) => pretty_assertions::assert_eq!(
            report.mismatch,
            Some(StructuralMismatch::FieldNames {
                path: vec!["user".to_string()],
                left: vec!["id".to_string(), "name".to_string()],
                right: vec!["email".to_string(), "name".to_string()],
            })
        ),
        other => panic!("unexpected comparison: {:?}", other),
    }
}

#[test]
fn missing_query_is_skipped() {
    let comparison = compare_queries("mutation { a }", "{ a }").expect("comparison failed");

    assert_eq!(comparison.is_equivalent(), None);
    assert_eq!(
        comparison,
        Comparison::Skipped {
            reason: "no query operation in the left document".to_string()
        }
    );
}

#[test]
fn inline_fragments_on_different_types_are_merged() {
    let comparison = compare_queries(
        "{ search { ... on User { name } ... on Post { title } } }",
        "{ search { ... on User { title } ... on Post { name } } }",
    )
    .expect("comparison failed");

    assert_eq!(comparison.is_equivalent(), Some(true));
}

#[test]
fn emptied_selection_set_is_not_a_leaf() {
    let comparison = compare_queries("{ a { ...Missing } }", "{ a }").expect("comparison failed");

    assert_eq!(comparison.is_equivalent(), Some(false));
    match comparison {
        Comparison::Compared(report) => {
            assert_eq!(
                report.mismatch,
                Some(StructuralMismatch::SelectionSetPresence {
                    path: vec![],
                    field: "a".to_string(),
                    left_has_selection_set: true,
                })
            );
            assert_eq!(report.left.levels(), vec!["a", ""]);
            assert_eq!(report.right.levels(), vec!["a"]);
        }
        other => panic!("unexpected comparison: {:?}", other),
    }

    let through_inline_fragment = compare_queries("{ a { ... on T { ...Missing } } }", "{ a }")
        .expect("comparison failed");
    assert_eq!(through_inline_fragment.is_equivalent(), Some(false));

    let both_emptied = compare_queries("{ a { ...Missing } }", "{ a { ...Other } }")
        .expect("comparison failed");
    assert_eq!(both_emptied.is_equivalent(), Some(true));
}

#[test]
fn parse_failure_names_the_document() {
    let error = compare_queries("{ a }", "{ a ").expect_err("parse should fail");

    match error {
        CompareError::Parse { document, .. } => assert_eq!(document, "right document"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn cycle_fails_the_comparison() {
    let error = compare_queries(
        "{ a }",
        "{ ...A }
        fragment A on Query { a ...A }",
    )
    .expect_err("cycle should fail");

    assert!(matches!(error, CompareError::FragmentCycle { .. }));
}

#[test]
fn report_serializes_to_json() {
    let comparison = compare_queries("{ a { b } }", "{ a { b } }").expect("comparison failed");

    assert_eq!(
        serde_json::to_value(&comparison).expect("failed to serialize"),
        serde_json::json!({
            "status": "compared",
            "left": ["a", "b"],
            "right": ["a", "b"],
            "equivalent": true,
        })
    );
}
