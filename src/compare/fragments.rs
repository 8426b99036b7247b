use std::collections::HashMap;

use crate::{
    ast::QueryVisitor,
    static_graphql::query::{Document, FragmentDefinition, SelectionSet},
};

/// Fragment selection sets of a document, indexed by fragment name.
///
/// Fragment names are not validated for uniqueness: when a name repeats, the
/// last definition wins.
#[derive(Debug, Default, Clone)]
pub struct FragmentCatalog {
    selection_sets: HashMap<String, SelectionSet>,
}

struct LocateFragments;

impl QueryVisitor<FragmentCatalog> for LocateFragments {
    fn enter_fragment_definition(&self, node: &FragmentDefinition, ctx: &mut FragmentCatalog) {
        if ctx
            .selection_sets
            .insert(node.name.clone(), node.selection_set.clone())
            .is_some()
        {
            tracing::debug!(fragment = %node.name, "fragment defined more than once, keeping the last definition");
        }
    }
}

impl FragmentCatalog {
    pub fn from_document(document: &Document) -> Self {
        let mut catalog = FragmentCatalog::default();
        LocateFragments.visit_document(document, &mut catalog);
        tracing::trace!(fragments = catalog.len(), "located fragments");

        catalog
    }

    pub fn get(&self, name: &str) -> Option<&SelectionSet> {
        self.selection_sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.selection_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection_sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.selection_sets.keys().map(String::as_str)
    }
}

#[test]
fn locates_every_fragment() {
    use crate::ast::SelectionSetExtension;
    use crate::compare::test_utils::*;

    let document = parse(
        "query { user { ...UserFields } }
        fragment UserFields on User { id ...Names }
        fragment Names on User { first last }",
    );
    let catalog = FragmentCatalog::from_document(&document);

    let mut names = catalog.names().collect::<Vec<_>>();
    names.sort();
    assert_eq!(names, vec!["Names", "UserFields"]);
    assert_eq!(
        catalog.get("Names").map(|set| set.field_names()),
        Some(vec!["first", "last"])
    );
    assert!(catalog.get("Missing").is_none());
}

#[test]
fn last_definition_wins() {
    use crate::ast::SelectionSetExtension;
    use crate::compare::test_utils::*;

    let document = parse(
        "fragment F on User { id }
        fragment F on User { name email }",
    );
    let catalog = FragmentCatalog::from_document(&document);

    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog.get("F").map(|set| set.field_names()),
        Some(vec!["name", "email"])
    );
}

#[test]
fn empty_without_fragments() {
    use crate::compare::test_utils::*;

    let catalog = FragmentCatalog::from_document(&parse("{ a b }"));
    assert!(catalog.is_empty());
}
