pub mod ext;
/// Utilities visiting GraphQL query documents
pub mod query_visitor;
pub mod utils;

pub use self::ext::*;
pub use self::query_visitor::*;
pub use self::utils::*;
