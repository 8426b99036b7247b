use std::fmt;

use crate::static_graphql::query::{OperationDefinition, Selection, SelectionSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

pub trait OperationDefinitionExtension {
    fn selection_set(&self) -> &SelectionSet;
    fn operation_kind(&self) -> OperationKind;
    fn name(&self) -> Option<&str>;

    fn is_query(&self) -> bool {
        self.operation_kind() == OperationKind::Query
    }
}

impl OperationDefinitionExtension for OperationDefinition {
    fn selection_set(&self) -> &SelectionSet {
        match self {
            OperationDefinition::Query(query) => &query.selection_set,
            OperationDefinition::SelectionSet(selection_set) => selection_set,
            OperationDefinition::Mutation(mutation) => &mutation.selection_set,
            OperationDefinition::Subscription(subscription) => &subscription.selection_set,
        }
    }

    /// Shorthand operations (`{ ... }`) are queries.
    fn operation_kind(&self) -> OperationKind {
        match self {
            OperationDefinition::Query(_) | OperationDefinition::SelectionSet(_) => {
                OperationKind::Query
            }
            OperationDefinition::Mutation(_) => OperationKind::Mutation,
            OperationDefinition::Subscription(_) => OperationKind::Subscription,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            OperationDefinition::Query(query) => query.name.as_deref(),
            OperationDefinition::SelectionSet(_) => None,
            OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
            OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
        }
    }
}

pub trait SelectionSetExtension {
    /// True when no `{ ... }` was written for the field. A written selection set stays
    /// a non-leaf even once expansion has left it without items.
    fn is_leaf(&self) -> bool;
    fn field_names(&self) -> Vec<&str>;
}

impl SelectionSetExtension for SelectionSet {
    fn is_leaf(&self) -> bool {
        // The parser gives fields without braces a zero-width span.
        self.items.is_empty() && self.span.0 == self.span.1
    }

    fn field_names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|selection| match selection {
                Selection::Field(field) => Some(field.name.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn operation_kind_of_each_definition() {
    use crate::static_graphql::query::Definition;
    use graphql_parser::query::parse_query;

    let document = parse_query::<String>(
        "query Named { a }
        { b }
        mutation Change { c }
        subscription Watch { d }",
    )
    .expect("failed to parse query")
    .into_static();

    let kinds: Vec<(OperationKind, Option<&str>)> = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Operation(operation) => Some((operation.operation_kind(), operation.name())),
            _ => None,
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            (OperationKind::Query, Some("Named")),
            (OperationKind::Query, None),
            (OperationKind::Mutation, Some("Change")),
            (OperationKind::Subscription, Some("Watch")),
        ]
    );
}

#[test]
fn leaf_is_told_apart_from_written_selection_set() {
    use crate::static_graphql::query::Definition;
    use graphql_parser::query::parse_query;

    let document = parse_query::<String>("{ a b { c } }")
        .expect("failed to parse query")
        .into_static();

    let root = match &document.definitions[0] {
        Definition::Operation(operation) => operation.selection_set(),
        other => panic!("unexpected definition: {:?}", other),
    };
    let fields = root
        .items
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field),
            _ => None,
        })
        .collect::<Vec<_>>();

    assert!(fields[0].selection_set.is_leaf());
    assert!(!fields[1].selection_set.is_leaf());

    let emptied = SelectionSet {
        span: fields[1].selection_set.span,
        items: vec![],
    };
    assert!(!emptied.is_leaf());
}
