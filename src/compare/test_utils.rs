use graphql_parser::query::parse_query;

use super::{expand_selection_set, CanonicalTree, CompareError, FragmentCatalog};
use crate::static_graphql::query::{Document, Selection, SelectionSet};

#[cfg(test)]
pub fn parse(source: &str) -> Document {
    parse_query::<String>(source)
        .expect("failed to parse query")
        .into_static()
}

/// Expands the root selection set of the first operation in `source`.
#[cfg(test)]
pub fn expand(source: &str) -> Result<SelectionSet, CompareError> {
    use crate::ast::{first_query, OperationDefinitionExtension};

    let document = parse(source);
    let catalog = FragmentCatalog::from_document(&document);
    let query = first_query(&document).expect("no query in test document");

    expand_selection_set(query.selection_set(), &catalog)
}

#[cfg(test)]
pub fn canonical(source: &str) -> CanonicalTree {
    CanonicalTree::from_document(&parse(source))
        .expect("failed to expand document")
        .expect("no query in test document")
}

/// Field names of one level, `None` for anything that is not a field.
#[cfg(test)]
pub fn field_names(selection_set: &SelectionSet) -> Vec<Option<&str>> {
    selection_set
        .items
        .iter()
        .map(|selection| match selection {
            Selection::Field(field) => Some(field.name.as_str()),
            _ => None,
        })
        .collect()
}
