use super::{CompareError, FragmentCatalog};
use crate::static_graphql::query::{Field, Selection, SelectionSet};

/// Rewrites a selection set into one that only holds fields.
///
/// Fragment spreads are replaced by the expanded selections of the fragment they
/// reference, inline fragments by their own expanded selections. Type conditions are
/// dropped, so every type-conditional branch is merged into the same level.
///
/// A spread referencing an unknown fragment contributes no selections.
/// A fragment spreading itself, directly or through other fragments, fails with
/// [`CompareError::FragmentCycle`].
pub fn expand_selection_set(
    selection_set: &SelectionSet,
    fragments: &FragmentCatalog,
) -> Result<SelectionSet, CompareError> {
    let mut spread_path = Vec::new();

    expand_selection_set_inner(selection_set, fragments, &mut spread_path)
}

/// Same as [`expand_selection_set`], over a plain list of selections.
pub fn expand_selections(
    selections: &[Selection],
    fragments: &FragmentCatalog,
) -> Result<Vec<Selection>, CompareError> {
    let mut spread_path = Vec::new();
    let mut result = Vec::with_capacity(selections.len());

    expand_selections_inner(selections, fragments, &mut spread_path, &mut result)?;

    Ok(result)
}

fn expand_selection_set_inner(
    selection_set: &SelectionSet,
    fragments: &FragmentCatalog,
    spread_path: &mut Vec<String>,
) -> Result<SelectionSet, CompareError> {
    let mut items = Vec::with_capacity(selection_set.items.len());
    expand_selections_inner(&selection_set.items, fragments, spread_path, &mut items)?;

    Ok(SelectionSet {
        span: selection_set.span,
        items,
    })
}

fn expand_selections_inner(
    selections: &[Selection],
    fragments: &FragmentCatalog,
    spread_path: &mut Vec<String>,
    result: &mut Vec<Selection>,
) -> Result<(), CompareError> {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                let selection_set =
                    expand_selection_set_inner(&field.selection_set, fragments, spread_path)?;

                result.push(Selection::Field(Field {
                    position: field.position,
                    alias: field.alias.clone(),
                    name: field.name.clone(),
                    arguments: field.arguments.clone(),
                    directives: field.directives.clone(),
                    selection_set,
                }));
            }
            Selection::FragmentSpread(fragment_spread) => {
                let name = &fragment_spread.fragment_name;

                // Only the fragments currently being expanded count: spreading the
                // same fragment twice side by side is fine.
                if let Some(start) = spread_path.iter().position(|visited| visited == name) {
                    let mut path = spread_path[start..].to_vec();
                    path.push(name.clone());

                    return Err(CompareError::FragmentCycle { path });
                }

                match fragments.get(name) {
                    Some(fragment_selection_set) => {
                        spread_path.push(name.clone());
                        expand_selections_inner(
                            &fragment_selection_set.items,
                            fragments,
                            spread_path,
                            result,
                        )?;
                        spread_path.pop();
                    }
                    None => {
                        tracing::debug!(fragment = %name, "dropping spread of unknown fragment");
                    }
                }
            }
            Selection::InlineFragment(inline_fragment) => {
                expand_selections_inner(
                    &inline_fragment.selection_set.items,
                    fragments,
                    spread_path,
                    result,
                )?;
            }
        }
    }

    Ok(())
}

#[test]
fn spread_is_flattened_in_place() {
    use crate::compare::test_utils::*;

    let expanded = expand(
        "{ c ...F d }
        fragment F on T { a b }",
    )
    .expect("expansion failed");

    assert_eq!(
        field_names(&expanded),
        vec![Some("c"), Some("a"), Some("b"), Some("d")]
    );
}

#[test]
fn inline_fragment_is_transparent() {
    use crate::compare::test_utils::*;

    let expanded = expand("{ a ... on T { b } ... @include(if: true) { c } }")
        .expect("expansion failed");

    assert_eq!(field_names(&expanded), vec![Some("a"), Some("b"), Some("c")]);
}

#[test]
fn unknown_fragment_contributes_nothing() {
    use crate::compare::test_utils::*;

    let expanded = expand("{ a ...Missing }").expect("expansion failed");

    assert_eq!(field_names(&expanded), vec![Some("a")]);
}

#[test]
fn nested_fragments_are_expanded_recursively() {
    use crate::compare::test_utils::*;

    let expanded = expand(
        "{ user { ...UserFields } }
        fragment UserFields on User { id friends { ...Names } }
        fragment Names on User { ... on User { first } last }",
    )
    .expect("expansion failed");

    let user = match &expanded.items[..] {
        [Selection::Field(user)] => user,
        other => panic!("unexpected selections: {:?}", other),
    };
    assert_eq!(field_names(&user.selection_set), vec![Some("id"), Some("friends")]);

    let friends = match &user.selection_set.items[1] {
        Selection::Field(friends) => friends,
        other => panic!("unexpected selection: {:?}", other),
    };
    assert_eq!(field_names(&friends.selection_set), vec![Some("first"), Some("last")]);
}

#[test]
fn field_details_are_kept() {
    use crate::compare::test_utils::*;

    let expanded = expand(
        "{ ...F }
        fragment F on Query { renamed: node(id: 4) @skip(if: false) { id } }",
    )
    .expect("expansion failed");

    match &expanded.items[..] {
        [Selection::Field(field)] => {
            assert_eq!(field.name, "node");
            assert_eq!(field.alias.as_deref(), Some("renamed"));
            assert_eq!(field.arguments.len(), 1);
            assert_eq!(field.directives.len(), 1);
        }
        other => panic!("unexpected selections: {:?}", other),
    }
}

#[test]
fn expanding_fragment_free_selections_is_identity() {
    use crate::compare::test_utils::*;

    let document = parse("{ a(id: 1) { b c { d } } x: e }");
    let root = match &document.definitions[0] {
        crate::static_graphql::query::Definition::Operation(operation) => {
            use crate::ast::OperationDefinitionExtension;
            operation.selection_set().clone()
        }
        other => panic!("unexpected definition: {:?}", other),
    };

    let expanded =
        expand_selection_set(&root, &FragmentCatalog::default()).expect("expansion failed");
    pretty_assertions::assert_eq!(expanded, root);

    let again = expand_selection_set(&expanded, &FragmentCatalog::default())
        .expect("expansion failed");
    pretty_assertions::assert_eq!(again, expanded);
}

#[test]
fn spreading_twice_is_not_circular() {
    use crate::compare::test_utils::*;

    let expanded = expand(
        "{ ...fragA }
        fragment fragA on Dog { ...fragB, ...fragC }
        fragment fragB on Dog { ...fragC }
        fragment fragC on Dog { name }",
    )
    .expect("expansion failed");

    assert_eq!(field_names(&expanded), vec![Some("name"), Some("name")]);
}

#[test]
fn spreading_itself_is_a_cycle() {
    use crate::compare::test_utils::*;

    let error = expand(
        "{ ...fragA }
        fragment fragA on Dog { name ...fragA }",
    )
    .expect_err("cycle should be detected");

    match error {
        CompareError::FragmentCycle { path } => assert_eq!(path, vec!["fragA", "fragA"]),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn indirect_cycle_within_inline_fragment() {
    use crate::compare::test_utils::*;

    let error = expand(
        "{ pet { ...entry } }
        fragment entry on Pet { ...fragA }
        fragment fragA on Pet { ... on Dog { ...fragB } }
        fragment fragB on Pet { ... on Dog { ...fragA } }",
    )
    .expect_err("cycle should be detected");

    match error {
        CompareError::FragmentCycle { path } => {
            assert_eq!(path, vec!["fragA", "fragB", "fragA"])
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn cycle_through_nested_field_is_detected() {
    use crate::compare::test_utils::*;

    let error = expand(
        "{ user { ...A } }
        fragment A on User { id friends { ...A } }",
    )
    .expect_err("cycle should be detected");

    match error {
        CompareError::FragmentCycle { path } => assert_eq!(path, vec!["A", "A"]),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn expand_selections_splices_lists() {
    use crate::compare::test_utils::*;

    let document = parse(
        "{ a ...F }
        fragment F on T { b }",
    );
    let catalog = FragmentCatalog::from_document(&document);
    let root = crate::ast::first_query(&document).expect("no query");

    use crate::ast::OperationDefinitionExtension;
    let selections =
        expand_selections(&root.selection_set().items, &catalog).expect("expansion failed");

    assert_eq!(selections.len(), 2);
    assert!(selections
        .iter()
        .all(|selection| matches!(selection, Selection::Field(_))));
}
