use crate::static_graphql::query::{self, Definition};

use super::OperationDefinitionExtension;

pub struct DefaultVisitorContext;

/// Returns the first query operation of the document, shorthand `{ ... }` included.
pub fn first_query(document: &query::Document) -> Option<&query::OperationDefinition> {
    document
        .definitions
        .iter()
        .find_map(|definition| match definition {
            Definition::Operation(operation) if operation.is_query() => Some(operation),
            _ => None,
        })
}

#[test]
fn first_query_skips_other_operations() {
    use graphql_parser::query::parse_query;

    let document = parse_query::<String>(
        "mutation M { a }
        fragment F on T { b }
        query First { c }
        query Second { d }",
    )
    .expect("failed to parse query")
    .into_static();

    let query = first_query(&document).expect("query should be found");
    assert_eq!(query.name(), Some("First"));
}

#[test]
fn first_query_is_none_without_queries() {
    use graphql_parser::query::parse_query;

    let document = parse_query::<String>("mutation M { a } subscription S { b }")
        .expect("failed to parse query")
        .into_static();

    assert!(first_query(&document).is_none());
}
