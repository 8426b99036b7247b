use crate::static_graphql::query::{
    Definition, Document, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, Selection, SelectionSet,
};

use super::{DefaultVisitorContext, OperationDefinitionExtension};

/// A trait for implementing a visitor over GraphQL query documents.
/// Your functions are called when the matching AST node is entered or left.
///
/// You can pass a custom <T> as context if you need to collect data while walking.
pub trait QueryVisitor<T = DefaultVisitorContext> {
    fn visit_document(&self, node: &Document, visitor_context: &mut T) {
        self.enter_document(node, visitor_context);

        for definition in &node.definitions {
            self.enter_definition(definition, visitor_context);

            match definition {
                Definition::Fragment(fragment) => {
                    self.enter_fragment_definition(fragment, visitor_context);
                    self.__visit_selection_set(&fragment.selection_set, visitor_context);
                    self.leave_fragment_definition(fragment, visitor_context);
                }
                Definition::Operation(operation) => {
                    self.enter_operation_definition(operation, visitor_context);
                    self.__visit_selection_set(operation.selection_set(), visitor_context);
                    self.leave_operation_definition(operation, visitor_context);
                }
            }

            self.leave_definition(definition, visitor_context);
        }

        self.leave_document(node, visitor_context);
    }

    fn __visit_selection_set(&self, node: &SelectionSet, visitor_context: &mut T) {
        self.enter_selection_set(node, visitor_context);

        for selection in &node.items {
            match selection {
                Selection::Field(field) => {
                    self.enter_field(field, visitor_context);
                    self.__visit_selection_set(&field.selection_set, visitor_context);
                    self.leave_field(field, visitor_context);
                }
                Selection::FragmentSpread(fragment_spread) => {
                    self.enter_fragment_spread(fragment_spread, visitor_context);
                    self.leave_fragment_spread(fragment_spread, visitor_context);
                }
                Selection::InlineFragment(inline_fragment) => {
                    self.enter_inline_fragment(inline_fragment, visitor_context);
                    self.__visit_selection_set(&inline_fragment.selection_set, visitor_context);
                    self.leave_inline_fragment(inline_fragment, visitor_context);
                }
            }
        }

        self.leave_selection_set(node, visitor_context);
    }

    fn enter_document(&self, _node: &Document, _visitor_context: &mut T) {}
    fn leave_document(&self, _node: &Document, _visitor_context: &mut T) {}

    fn enter_definition(&self, _node: &Definition, _visitor_context: &mut T) {}
    fn leave_definition(&self, _node: &Definition, _visitor_context: &mut T) {}

    fn enter_fragment_definition(&self, _node: &FragmentDefinition, _visitor_context: &mut T) {}
    fn leave_fragment_definition(&self, _node: &FragmentDefinition, _visitor_context: &mut T) {}

    fn enter_operation_definition(&self, _node: &OperationDefinition, _visitor_context: &mut T) {}
    fn leave_operation_definition(&self, _node: &OperationDefinition, _visitor_context: &mut T) {}

    fn enter_selection_set(&self, _node: &SelectionSet, _visitor_context: &mut T) {}
    fn leave_selection_set(&self, _node: &SelectionSet, _visitor_context: &mut T) {}

    fn enter_field(&self, _node: &Field, _visitor_context: &mut T) {}
    fn leave_field(&self, _node: &Field, _visitor_context: &mut T) {}

    fn enter_fragment_spread(&self, _node: &FragmentSpread, _visitor_context: &mut T) {}
    fn leave_fragment_spread(&self, _node: &FragmentSpread, _visitor_context: &mut T) {}

    fn enter_inline_fragment(&self, _node: &InlineFragment, _visitor_context: &mut T) {}
    fn leave_inline_fragment(&self, _node: &InlineFragment, _visitor_context: &mut T) {}
}

#[test]
fn visit_test_all_nodes() {
    use graphql_parser::query::parse_query;

    let query_ast = parse_query::<String>(
        r#"query someQuery($v: String) {
      hero(v: $v, otherV: 10) {
        name
      }

      test {
        ...SpreadHere

        anotherField {
          nested {
            moreNested
          }
        }
      }

      search(term: "Test") {
        ... on SearchResult {
          result
        }
      }
    }

    fragment SpreadHere on Test {
      id
    }"#,
    )
    .expect("failed to parse query")
    .into_static();

    #[derive(Default)]
    struct TestVisitorCollected {
        fields: Vec<String>,
        spreads: Vec<String>,
        inline_fragments: usize,
        fragment_definitions: Vec<String>,
    }

    struct TestVisitor;

    impl QueryVisitor<TestVisitorCollected> for TestVisitor {
        fn enter_field(&self, node: &Field, ctx: &mut TestVisitorCollected) {
            ctx.fields.push(node.name.clone());
        }

        fn enter_fragment_spread(&self, node: &FragmentSpread, ctx: &mut TestVisitorCollected) {
            ctx.spreads.push(node.fragment_name.clone());
        }

        fn enter_inline_fragment(&self, _node: &InlineFragment, ctx: &mut TestVisitorCollected) {
            ctx.inline_fragments += 1;
        }

        fn enter_fragment_definition(
            &self,
            node: &FragmentDefinition,
            ctx: &mut TestVisitorCollected,
        ) {
            ctx.fragment_definitions.push(node.name.clone());
        }
    }

    let mut collector = TestVisitorCollected::default();
    TestVisitor.visit_document(&query_ast, &mut collector);

    assert_eq!(
        collector.fields,
        vec!["hero", "name", "test", "anotherField", "nested", "moreNested", "search", "result", "id"]
    );
    assert_eq!(collector.spreads, vec!["SpreadHere"]);
    assert_eq!(collector.inline_fragments, 1);
    assert_eq!(collector.fragment_definitions, vec!["SpreadHere"]);
}
