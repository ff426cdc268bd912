//! Operator precedence for binary operators.

use esparse_ast::syntax_kind::SyntaxKind;

/// Operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullishCoalescing = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    BitwiseOr = 4,
    BitwiseXor = 5,
    BitwiseAnd = 6,
    Equality = 7,
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Exponentiation = 12,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The precedence one level tighter, used as the minimum for the right
    /// operand of a left-associative operator.
    pub fn next(self) -> OperatorPrecedence {
        match self {
            OperatorPrecedence::Lowest => OperatorPrecedence::NullishCoalescing,
            OperatorPrecedence::NullishCoalescing => OperatorPrecedence::LogicalOr,
            OperatorPrecedence::LogicalOr => OperatorPrecedence::LogicalAnd,
            OperatorPrecedence::LogicalAnd => OperatorPrecedence::BitwiseOr,
            OperatorPrecedence::BitwiseOr => OperatorPrecedence::BitwiseXor,
            OperatorPrecedence::BitwiseXor => OperatorPrecedence::BitwiseAnd,
            OperatorPrecedence::BitwiseAnd => OperatorPrecedence::Equality,
            OperatorPrecedence::Equality => OperatorPrecedence::Relational,
            OperatorPrecedence::Relational => OperatorPrecedence::Shift,
            OperatorPrecedence::Shift => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            OperatorPrecedence::Multiplicative => OperatorPrecedence::Exponentiation,
            OperatorPrecedence::Exponentiation | OperatorPrecedence::Invalid => {
                OperatorPrecedence::Invalid
            }
        }
    }

    #[inline]
    pub fn is_right_associative(self) -> bool {
        self == OperatorPrecedence::Exponentiation
    }
}

/// Get the binary operator precedence for a given token kind.
///
/// `in` has no precedence when `no_in` is set (the head of a `for`).
pub fn get_binary_operator_precedence(kind: SyntaxKind, no_in: bool) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::InKeyword if no_in => OperatorPrecedence::Invalid,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(OperatorPrecedence::Multiplicative > OperatorPrecedence::Additive);
        assert!(OperatorPrecedence::LogicalAnd > OperatorPrecedence::LogicalOr);
        assert!(OperatorPrecedence::LogicalOr > OperatorPrecedence::NullishCoalescing);
        assert_eq!(OperatorPrecedence::Additive.next(), OperatorPrecedence::Multiplicative);
    }

    #[test]
    fn test_no_in() {
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::InKeyword, false),
            OperatorPrecedence::Relational
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::InKeyword, true),
            OperatorPrecedence::Invalid
        );
        assert!(OperatorPrecedence::Exponentiation.is_right_associative());
        assert!(!OperatorPrecedence::Additive.is_right_associative());
    }
}
