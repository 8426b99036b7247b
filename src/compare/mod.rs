/// Utilities comparing GraphQL query documents by shape
pub mod canonical;
pub mod comparison;
pub mod error;
pub mod expand;
pub mod fragments;
pub mod structural;

#[cfg(test)]
pub mod test_utils;

pub use self::canonical::*;
pub use self::comparison::*;
pub use self::error::*;
pub use self::expand::*;
pub use self::fragments::*;
pub use self::structural::*;
