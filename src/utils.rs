use std::io;
use thiserror::Error;

use crate::symbol::SymbolKind;

/// Custom error types for grammar construction, analysis and transformation
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid symbol name {0:?}")]
    InvalidName(String),

    #[error("name clash: {name:?} is already registered as a {existing}")]
    NameClash { name: String, existing: SymbolKind },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing rule for nonterminal {0:?}")]
    MissingRule(String),

    #[error("syntax error in line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GrammarError::NameClash {
            name: "x".to_string(),
            existing: SymbolKind::Nonterminal,
        };
        assert_eq!(
            format!("{}", err),
            "name clash: \"x\" is already registered as a nonterminal"
        );

        let err = GrammarError::Syntax {
            line: 3,
            message: "\"->\" missing".to_string(),
        };
        assert_eq!(format!("{}", err), "syntax error in line 3: \"->\" missing");
    }
}
