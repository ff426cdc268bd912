//! Errors that unwind through the parser.

use esparse_diagnostics::Diagnostic;
use thiserror::Error;

/// Why a parse rule gave up.
///
/// `Syntax` errors are recoverable: the nearest statement list records the
/// diagnostic and resynchronizes. The other variants abort the whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(Box<Diagnostic>),

    #[error("internal parser error: {0}")]
    Internal(&'static str),

    #[error("maximum nesting depth of {0} exceeded at offset {1}")]
    RecursionLimit(u32, u32),
}

impl ParseError {
    pub fn syntax(diagnostic: Diagnostic) -> Self {
        ParseError::Syntax(Box::new(diagnostic))
    }

    /// Whether statement-list recovery may swallow this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseError::Syntax(d) => Some(d),
            _ => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use esparse_core::TextSpan;
    use esparse_diagnostics::messages;

    #[test]
    fn test_only_syntax_errors_recover() {
        let err = ParseError::syntax(Diagnostic::at(
            TextSpan::from_bounds(0, 1),
            &messages::EXPRESSION_EXPECTED,
            &[],
        ));
        assert!(err.is_recoverable());
        assert_eq!(err.diagnostic().map(|d| d.code), Some(1109));
        assert!(!ParseError::Internal("frame stack imbalance").is_recoverable());
        assert!(!ParseError::RecursionLimit(200, 10).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = ParseError::RecursionLimit(200, 42);
        assert_eq!(err.to_string(), "maximum nesting depth of 200 exceeded at offset 42");
    }
}
