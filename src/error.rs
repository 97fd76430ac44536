use std::fmt;

use crate::token::{Span, TokenType};

/// Classifies every diagnostic the interpreter can report.
///
/// Lexical, syntactic and evaluation errors share this one taxonomy
/// so that they can travel through a single reporting channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Numeric literal with a second decimal point.
    ExtraDecimalPoint(String),
    /// Numeric literal that does not convert to a number.
    InvalidNumber(String),
    /// Character that cannot start any token.
    InvalidToken(char),
    /// Statement starting with a word that is not a keyword.
    UnknownCommand(String),
    /// Statement starting with `=`.
    DidYouMeanLet,
    /// Token stream ran out before the end-of-input guard.
    NoMoreTokens,
    /// Lexer error surfaced by the parser.
    Tokenizer(Box<ErrorKind>),
    /// Token mismatch inside a statement.
    ExpectedGot {
        expected: TokenType,
        got: TokenType,
    },
    LetVariableNotSet,
    LetValueNotSet,
    LetInvalidParams,
    ResetInvalidParams,
    VarsInvalidParams,
    ExprGeneric,
    ExprBufferOverflow,
    ExprOpenParen,
    ExprExtraOperator,
    ExprMissingOperand,
    ExprVariableNotSet(char),
    ExprDivideByZero,
}

impl ErrorKind {
    /// Stable numeric code printed next to the message.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::ExtraDecimalPoint(_) => 1,
            Self::InvalidNumber(_) => 2,
            Self::InvalidToken(_) => 3,
            Self::UnknownCommand(_) => 4,
            Self::DidYouMeanLet => 5,
            Self::NoMoreTokens => 6,
            Self::Tokenizer(_) => 7,
            Self::ExpectedGot { .. } => 8,
            Self::LetVariableNotSet => 9,
            Self::LetValueNotSet => 10,
            Self::LetInvalidParams => 11,
            Self::ResetInvalidParams => 12,
            Self::VarsInvalidParams => 13,
            Self::ExprGeneric => 14,
            Self::ExprBufferOverflow => 15,
            Self::ExprOpenParen => 16,
            Self::ExprExtraOperator => 17,
            Self::ExprMissingOperand => 18,
            Self::ExprVariableNotSet(_) => 19,
            Self::ExprDivideByZero => 20,
        }
    }

    /// True for the expected-vs-got mismatch, which the interpreter
    /// hides unless configured otherwise.
    #[must_use]
    pub const fn is_syntax_mismatch(&self) -> bool {
        matches!(self, Self::ExpectedGot { .. })
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtraDecimalPoint(literal) => write!(f, "Extra decimal point in '{literal}'."),
            Self::InvalidNumber(literal) => write!(f, "Could not convert '{literal}' to number."),
            Self::InvalidToken(ch) => write!(f, "Invalid token '{ch}'."),
            Self::UnknownCommand(word) => write!(f, "Unknown command '{word}'."),
            Self::DidYouMeanLet => write!(
                f,
                "Did you mean to assign a value? Use LET <var> = <number>."
            ),
            Self::NoMoreTokens => write!(f, "There are no more tokens to parse (unexpected EOF)."),
            Self::Tokenizer(inner) => write!(f, "{inner}"),
            Self::ExpectedGot { expected, got } => {
                write!(f, "Incorrect token. Expected: {expected}, got: {got}.")
            }
            Self::LetVariableNotSet => write!(f, "Variable not set (valid variables are [A-Z])."),
            Self::LetValueNotSet => {
                write!(f, "Value not set (only numbers are considered values).")
            }
            Self::LetInvalidParams => write!(
                f,
                "LET only accepts one value to be assigned to a single variable."
            ),
            Self::ResetInvalidParams => write!(f, "RESET does not accept parameters."),
            Self::VarsInvalidParams => write!(f, "VARS does not accept parameters."),
            Self::ExprGeneric => write!(f, "The expression has one or more errors."),
            Self::ExprBufferOverflow => write!(f, "Expression buffer overflow."),
            Self::ExprOpenParen => write!(f, "The expression contains an opened parenthesis."),
            Self::ExprExtraOperator => write!(f, "Invalid extra operator."),
            Self::ExprMissingOperand => write!(f, "Missing operand."),
            Self::ExprVariableNotSet(letter) => write!(f, "Variable {letter} is not set."),
            Self::ExprDivideByZero => write!(f, "Divide by zero."),
        }
    }
}

/// A reported diagnostic, with the location of the offending token
/// when one is known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Option<Span>,
}

impl Error {
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }

    #[must_use]
    pub const fn at(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }

    #[must_use]
    pub const fn code(&self) -> u8 {
        self.kind.code()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_taxonomy_order() {
        assert_eq!(ErrorKind::ExtraDecimalPoint(String::new()).code(), 1);
        assert_eq!(ErrorKind::UnknownCommand("FOO".into()).code(), 4);
        assert_eq!(ErrorKind::LetVariableNotSet.code(), 9);
        assert_eq!(ErrorKind::ExprDivideByZero.code(), 20);
    }

    #[test]
    fn tokenizer_error_keeps_lexer_message() {
        let inner = ErrorKind::InvalidToken('@');
        let wrapped = ErrorKind::Tokenizer(Box::new(inner.clone()));
        assert_eq!(wrapped.to_string(), inner.to_string());
        assert_eq!(wrapped.code(), 7);
    }

    #[test]
    fn expected_got_message() {
        let kind = ErrorKind::ExpectedGot {
            expected: TokenType::Variable,
            got: TokenType::Equals,
        };
        assert_eq!(
            kind.to_string(),
            "Incorrect token. Expected: VAR, got: EQUALS."
        );
        assert!(kind.is_syntax_mismatch());
    }

    #[test]
    fn error_display_is_message_only() {
        let err = Error::new(ErrorKind::ExprVariableNotSet('B'));
        assert_eq!(err.to_string(), "Variable B is not set.");
        assert_eq!(err.code(), 19);
    }
}
