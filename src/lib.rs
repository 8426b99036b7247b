//! graphql-query-compare
//! =====================
//!
//! Decides whether two GraphQL query documents request the same shape of data
//! once every fragment has been inlined.
//! Works on the `struct`s implemented in `graphql_parser` crate.
//!

pub mod ast;

pub mod static_graphql {
    macro_rules! static_graphql {
    ($m:ident, $m2:ident, {$($n:ident,)*}) => {
        pub mod $m {
            use graphql_parser::$m2 as $m;
            pub use $m::*;
            $(
                pub type $n = $m::$n<'static, String>;
            )*
        }
    };
  }

    static_graphql!(query, query, {
      Document, OperationDefinition, InlineFragment, TypeCondition,
      FragmentSpread, Field, Selection, SelectionSet, FragmentDefinition,
      Directive, Query, Definition, Subscription, Mutation,
    });
}

pub mod compare;

pub use self::compare::{
    compare_documents, compare_queries, parse_document, CanonicalTree, CompareError, Comparison,
    ComparisonReport, FragmentCatalog, StructuralMismatch,
};
