use std::fmt;

use serde::{Serialize, Serializer};

use super::{expand_selection_set, CompareError, FragmentCatalog};
use crate::ast::{first_query, OperationDefinitionExtension, SelectionSetExtension};
use crate::static_graphql::query::{Document, Field, OperationDefinition, Selection, SelectionSet};

/// A query's selection tree with every fragment inlined: only fields remain, at every depth.
///
/// Only the expander builds these, so the field-only shape always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTree(SelectionSet);

impl CanonicalTree {
    /// Canonical tree of the first query operation in the document, `None` when the
    /// document has no query.
    pub fn from_document(document: &Document) -> Result<Option<Self>, CompareError> {
        let query = match first_query(document) {
            Some(query) => query,
            None => {
                tracing::debug!("document has no query operation");
                return Ok(None);
            }
        };

        let fragments = FragmentCatalog::from_document(document);
        Self::from_operation(query, &fragments).map(Some)
    }

    pub fn from_operation(
        operation: &OperationDefinition,
        fragments: &FragmentCatalog,
    ) -> Result<Self, CompareError> {
        tracing::trace!(
            operation = operation.name().unwrap_or("<anonymous>"),
            kind = %operation.operation_kind(),
            "expanding operation"
        );

        expand_selection_set(operation.selection_set(), fragments).map(CanonicalTree)
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        fields_of(&self.0)
    }

    /// Field names level by level, breadth first. Selection sets sharing a level are
    /// separated by a tab, field names by a space.
    pub fn levels(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current_level = vec![&self.0];

        while !current_level.is_empty() {
            let mut next_level = Vec::new();
            let mut groups = Vec::with_capacity(current_level.len());

            for selection_set in current_level {
                let mut names = Vec::with_capacity(selection_set.items.len());

                for field in fields_of(selection_set) {
                    names.push(field.name.as_str());

                    if !field.selection_set.is_leaf() {
                        next_level.push(&field.selection_set);
                    }
                }

                groups.push(names.join(" "));
            }

            lines.push(groups.join("\t"));
            current_level = next_level;
        }

        lines
    }
}

impl fmt::Display for CanonicalTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels().join("\n"))
    }
}

impl Serialize for CanonicalTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.levels())
    }
}

pub(crate) fn fields_of(selection_set: &SelectionSet) -> impl Iterator<Item = &Field> {
    selection_set.items.iter().filter_map(|selection| match selection {
        Selection::Field(field) => Some(field),
        other => {
            debug_assert!(false, "non-field selection in canonical tree: {:?}", other);
            None
        }
    })
}

#[test]
fn builds_from_first_query() {
    use crate::compare::test_utils::*;

    let tree = canonical(
        "mutation M { ignored }
        query Q { user { ...Fields } }
        query Other { other }
        fragment Fields on User { name id }",
    );

    assert_eq!(tree.fields().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["user"]);
    assert_eq!(tree.levels(), vec!["user", "name id"]);
}

#[test]
fn absent_without_query() {
    use crate::compare::test_utils::*;

    let tree = CanonicalTree::from_document(&parse(
        "mutation M { a }
        fragment F on T { b }",
    ))
    .expect("expansion failed");

    assert!(tree.is_none());
}

#[test]
fn cycle_is_reported() {
    use crate::compare::test_utils::*;

    let result = CanonicalTree::from_document(&parse(
        "{ ...A }
        fragment A on T { ...B }
        fragment B on T { ...A }",
    ));

    assert!(matches!(result, Err(CompareError::FragmentCycle { .. })));
}

#[test]
fn renders_one_line_per_level() {
    use crate::compare::test_utils::*;

    let tree = canonical(
        "{
          user { id friends { name } }
          viewer { ...V }
          version
        }
        fragment V on Viewer { login }",
    );

    pretty_assertions::assert_eq!(
        tree.to_string(),
        "user viewer version\nid friends\tlogin\nname"
    );
    assert_eq!(
        serde_json::to_value(&tree).expect("failed to serialize"),
        serde_json::json!(["user viewer version", "id friends\tlogin", "name"])
    );
}
