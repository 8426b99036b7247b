use graphql_parser::query::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Failed to parse {document}: {source}")]
    Parse {
        document: String,
        #[source]
        source: ParseError,
    },

    #[error("Cannot spread fragment \"{}\" within itself (via {}).", .path.last().map(String::as_str).unwrap_or_default(), .path.join(" -> "))]
    FragmentCycle { path: Vec<String> },
}

#[test]
fn fragment_cycle_message_names_the_path() {
    let error = CompareError::FragmentCycle {
        path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
    };

    assert_eq!(
        error.to_string(),
        "Cannot spread fragment \"A\" within itself (via A -> B -> A)."
    );
}
