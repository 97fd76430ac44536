use crate::error::ErrorKind;
use crate::token::{KEYWORDS, Span, Token, TokenKind, TokenType};

/// Tokenize one line of PQC source into a sequence of tokens.
///
/// Never fails: malformed literals and invalid characters become
/// [`TokenKind::Error`] tokens that the parser reports later. The
/// result always ends with one `Newline` followed by one `EndOfInput`.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' => {
                    while matches!(self.peek(), Some(' ' | '\t')) {
                        self.advance();
                    }
                }
                '\n' | '\r' => {
                    let span = self.span();
                    self.advance();
                    if ch == '\r' && self.peek() == Some('\n') {
                        self.advance();
                    }
                    tokens.push(Token {
                        kind: TokenKind::Newline,
                        span,
                    });
                    self.line += 1;
                    self.col = 1;
                }
                '-' => self.read_minus(&mut tokens),
                '=' | '+' | '*' | '/' | '^' | '(' | ')' => {
                    let kind = match ch {
                        '=' => TokenKind::Equals,
                        '+' => TokenKind::Add,
                        '*' => TokenKind::Mul,
                        '/' => TokenKind::Div,
                        '^' => TokenKind::Pow,
                        '(' => TokenKind::OpenParen,
                        _ => TokenKind::CloseParen,
                    };
                    tokens.push(self.make_token(kind));
                    self.advance();
                }
                c if c.is_ascii_digit() || c == '.' => {
                    tokens.push(self.read_number());
                }
                c if c.is_ascii_alphabetic() || c.is_ascii_punctuation() => {
                    tokens.push(self.read_word());
                }
                c => {
                    let kind = TokenKind::Error(ErrorKind::InvalidToken(c));
                    tokens.push(self.make_token(kind));
                    self.advance();
                }
            }
        }

        let end = self.span();
        if tokens.last().map(Token::token_type) != Some(TokenType::Newline) {
            tokens.push(Token {
                kind: TokenKind::Newline,
                span: end,
            });
        }
        tokens.push(Token {
            kind: TokenKind::EndOfInput,
            span: end,
        });

        log::debug!(
            "tokens: {:?}",
            tokens.iter().map(Token::token_type).collect::<Vec<_>>()
        );

        tokens
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    const fn make_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            span: self.span(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
            self.col += 1;
        }
    }

    /// `-` is a negation wherever a binary operator cannot start.
    /// Two negations in a row cancel out.
    fn read_minus(&mut self, tokens: &mut Vec<Token>) {
        let previous = tokens.last().map(|t| &t.kind);
        let is_negate = previous.is_none_or(TokenKind::expects_operand);

        if is_negate && previous == Some(&TokenKind::Negate) {
            tokens.pop();
        } else {
            let kind = if is_negate {
                TokenKind::Negate
            } else {
                TokenKind::Sub
            };
            tokens.push(self.make_token(kind));
        }
        self.advance();
    }

    fn read_number(&mut self) -> Token {
        let span = self.span();
        let mut text = String::new();
        let mut seen_point = false;
        let mut extra_point = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
            } else if c == '.' {
                text.push(c);
                if seen_point {
                    // the literal ends at the second point
                    self.advance();
                    extra_point = true;
                    break;
                }
                seen_point = true;
            } else {
                break;
            }
            self.advance();
        }

        let kind = if extra_point {
            TokenKind::Error(ErrorKind::ExtraDecimalPoint(text))
        } else {
            match text.parse::<f64>() {
                Ok(value) => TokenKind::Number(value),
                Err(_) => TokenKind::Error(ErrorKind::InvalidNumber(text)),
            }
        };

        Token { kind, span }
    }

    fn read_word(&mut self) -> Token {
        let span = self.span();

        if let Some(letter) = self.peek().filter(char::is_ascii_uppercase) {
            if self.peek_at(1).is_none_or(ends_variable) {
                self.advance();
                return Token {
                    kind: TokenKind::Variable(letter),
                    span,
                };
            }
        }

        let mut text = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                break;
            }
            text.push(c);
            self.advance();
        }

        let kind = KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map_or(TokenKind::Word(text), |(_, kind)| kind.clone());

        Token { kind, span }
    }
}

/// Characters that may follow a single-letter variable.
const fn ends_variable(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '=' | '+' | '-' | '*' | '/' | '^' | '(' | ')'
    )
}
