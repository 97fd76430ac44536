use std::fmt;

use crate::error::ErrorKind;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer, each with its own payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Unrecognized multi-character word.
    Word(String),
    /// Single-letter variable `A`..`Z`.
    Variable(char),
    /// Numeric literal.
    Number(f64),
    /// Line terminator (`\n`, `\r` or `\r\n`).
    Newline,
    /// End of the token stream.
    EndOfInput,
    /// `=`
    Equals,
    /// `+`
    Add,
    /// `-` in binary position.
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `-` in unary position.
    Negate,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `LET`
    StatementLet,
    /// `RESET`
    StatementReset,
    /// `VARS`
    StatementVars,
    /// `CLEAR`
    StatementClear,
    /// `EXIT`
    StatementExit,
    /// Malformed literal or invalid character, reported later by the parser.
    Error(ErrorKind),
}

/// Payload-free discriminant of [`TokenKind`], used when the parser
/// only cares about what kind of token comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Word,
    Variable,
    Number,
    Newline,
    EndOfInput,
    Equals,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Negate,
    OpenParen,
    CloseParen,
    StatementLet,
    StatementReset,
    StatementVars,
    StatementClear,
    StatementExit,
    Error,
}

impl TokenType {
    /// Upper-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Word => "WORD",
            Self::Variable => "VAR",
            Self::Number => "NUMBER",
            Self::Newline => "NEWLINE",
            Self::EndOfInput => "EOF",
            Self::Equals => "EQUALS",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Pow => "POW",
            Self::Negate => "NEG",
            Self::OpenParen => "OPEN_PAREN",
            Self::CloseParen => "CLOSE_PAREN",
            Self::StatementLet => "STMT_LET",
            Self::StatementReset => "STMT_RESET",
            Self::StatementVars => "STMT_VARS",
            Self::StatementClear => "STMT_CLEAR",
            Self::StatementExit => "STMT_EXIT",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statement keywords, matched exactly against a lexed word.
pub const KEYWORDS: [(&str, TokenKind); 5] = [
    ("LET", TokenKind::StatementLet),
    ("RESET", TokenKind::StatementReset),
    ("VARS", TokenKind::StatementVars),
    ("CLEAR", TokenKind::StatementClear),
    ("EXIT", TokenKind::StatementExit),
];

impl TokenKind {
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Word(_) => TokenType::Word,
            Self::Variable(_) => TokenType::Variable,
            Self::Number(_) => TokenType::Number,
            Self::Newline => TokenType::Newline,
            Self::EndOfInput => TokenType::EndOfInput,
            Self::Equals => TokenType::Equals,
            Self::Add => TokenType::Add,
            Self::Sub => TokenType::Sub,
            Self::Mul => TokenType::Mul,
            Self::Div => TokenType::Div,
            Self::Pow => TokenType::Pow,
            Self::Negate => TokenType::Negate,
            Self::OpenParen => TokenType::OpenParen,
            Self::CloseParen => TokenType::CloseParen,
            Self::StatementLet => TokenType::StatementLet,
            Self::StatementReset => TokenType::StatementReset,
            Self::StatementVars => TokenType::StatementVars,
            Self::StatementClear => TokenType::StatementClear,
            Self::StatementExit => TokenType::StatementExit,
            Self::Error(_) => TokenType::Error,
        }
    }

    /// The single printable character a symbol token stands for.
    ///
    /// Negation uses `~` so it can be told apart from subtraction
    /// once the token stream is flattened to postfix form.
    #[must_use]
    pub const fn symbol(&self) -> Option<char> {
        match self {
            Self::Newline => Some('\n'),
            Self::Equals => Some('='),
            Self::Add => Some('+'),
            Self::Sub => Some('-'),
            Self::Mul => Some('*'),
            Self::Div => Some('/'),
            Self::Pow => Some('^'),
            Self::Negate => Some('~'),
            Self::OpenParen => Some('('),
            Self::CloseParen => Some(')'),
            _ => None,
        }
    }

    /// Whether a `-` following this token must be a negation
    /// (no binary operator can start here).
    #[must_use]
    pub const fn expects_operand(&self) -> bool {
        matches!(
            self,
            Self::Newline
                | Self::Equals
                | Self::Add
                | Self::Sub
                | Self::Mul
                | Self::Div
                | Self::Pow
                | Self::Negate
                | Self::OpenParen
        )
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }
}
