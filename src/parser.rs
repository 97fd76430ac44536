//! Recursive-descent parser for PQC statements.
//!
//! ```text
//! program    = (stmt | NEWLINE)*
//! stmt       = let_stmt | reset_stmt | vars_stmt | clear_stmt | exit_stmt | expr_stmt
//! let_stmt   = "LET" var "=" number
//! reset_stmt = "RESET"
//! vars_stmt  = "VARS"
//! clear_stmt = "CLEAR"
//! exit_stmt  = "EXIT"
//! expr_stmt  = expr
//! expr       = term (("+"|"-") term)*
//! term       = factor (("*"|"/") factor)*
//! factor     = base ("^" factor)*
//! base       = "(" expr ")" | "~" term | var | number
//! var        = [A-Z]
//! number     = "~"? digits ("." digits)?
//! ```
//!
//! The parser builds no tree. It drives a [`Callbacks`] implementation
//! as it recognizes each piece of a statement, and recovers from a bad
//! token by skipping to the next line.

use crate::error::{Error, ErrorKind};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind, TokenType};

/// Semantic actions invoked while parsing.
///
/// Payload-carrying events pass `None` when the expected token could
/// not be consumed. Every method has a no-op default so consumers only
/// implement what they care about.
#[allow(unused_variables)]
pub trait Callbacks {
    /// `LET`: the variable, the signed value and whether the statement
    /// was properly terminated.
    fn on_let(&mut self, variable: Option<char>, value: Option<f64>, terminated: bool) {}
    fn on_reset(&mut self, ok: bool) {}
    fn on_vars(&mut self, ok: bool) {}
    fn on_clear(&mut self) {}
    fn on_exit(&mut self) {}
    fn on_expr_begin(&mut self, ok: bool) {}
    fn on_expr_end(&mut self, ok: bool) {}
    fn on_variable(&mut self, letter: Option<char>) {}
    fn on_number(&mut self, value: Option<f64>) {}
    /// Operators, parentheses, `=` and line breaks, as their symbol
    /// character (`~` for negation).
    fn on_symbol(&mut self, symbol: Option<char>) {}
    fn on_error(&mut self, error: Error) {}
}

/// Parse a token stream, reporting every statement to `callbacks`.
///
/// Malformed statements never abort the walk: each one produces one
/// or more `on_error` calls and parsing resumes on the next line.
pub fn parse<C: Callbacks + ?Sized>(tokens: &[Token], callbacks: &mut C) {
    Parser::new(tokens, callbacks).parse();
}

/// Tokenize and parse a source string in one step.
pub fn parse_str<C: Callbacks + ?Sized>(input: &str, callbacks: &mut C) {
    let tokens = tokenize(input);
    parse(&tokens, callbacks);
}

struct Parser<'a, C: ?Sized> {
    tokens: &'a [Token],
    pos: usize,
    callbacks: &'a mut C,
}

impl<'a, C: Callbacks + ?Sized> Parser<'a, C> {
    const fn new(tokens: &'a [Token], callbacks: &'a mut C) -> Self {
        Self {
            tokens,
            pos: 0,
            callbacks,
        }
    }

    fn parse(mut self) {
        if self.tokens.is_empty() {
            self.callbacks
                .on_error(Error::new(ErrorKind::NoMoreTokens));
            return;
        }
        self.program();
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn token_type(&self) -> TokenType {
        self.peek_type(0)
    }

    fn peek_type(&self, offset: usize) -> TokenType {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenType::EndOfInput, Token::token_type)
    }

    /// Step to the next token. Stepping past the last one reports
    /// `NoMoreTokens` and leaves the cursor at end of input.
    fn advance(&mut self) -> bool {
        if self.pos + 1 >= self.tokens.len() {
            self.pos = self.tokens.len();
            self.callbacks
                .on_error(Error::new(ErrorKind::NoMoreTokens));
            return false;
        }
        self.pos += 1;
        true
    }

    /// Consume a token of the expected type and return it. On mismatch,
    /// report the error and skip ahead to the next newline.
    fn consume(&mut self, expected: TokenType) -> Option<&'a Token> {
        log::trace!("consume({expected})");

        let token = self.current()?;
        if token.token_type() == expected {
            self.advance();
            return Some(token);
        }

        self.callbacks.on_error(Error::at(
            ErrorKind::ExpectedGot {
                expected,
                got: token.token_type(),
            },
            token.span,
        ));
        if let TokenKind::Error(kind) = &token.kind {
            self.report_lex_error(kind, token);
        }
        self.synchronize();
        None
    }

    fn synchronize(&mut self) {
        while self.pos + 1 < self.tokens.len() && self.token_type() != TokenType::Newline {
            self.pos += 1;
        }
    }

    fn report_lex_error(&mut self, kind: &ErrorKind, token: &Token) {
        self.callbacks.on_error(Error::at(
            ErrorKind::Tokenizer(Box::new(kind.clone())),
            token.span,
        ));
    }

    fn symbol(&mut self, consumed: Option<&Token>) {
        self.callbacks
            .on_symbol(consumed.and_then(|t| t.kind.symbol()));
    }

    fn program(&mut self) {
        log::trace!("program()");

        loop {
            let start = self.pos;
            match self.token_type() {
                TokenType::EndOfInput => break,
                TokenType::Newline => {
                    if !self.advance() {
                        break;
                    }
                }
                // `5 = 3` reads as an assignment missing its LET
                TokenType::Number if self.peek_type(1) == TokenType::Equals => {
                    self.unexpected_start();
                }
                TokenType::StatementLet
                | TokenType::StatementReset
                | TokenType::StatementVars
                | TokenType::StatementClear
                | TokenType::StatementExit
                | TokenType::OpenParen
                | TokenType::Variable
                | TokenType::Number
                | TokenType::Negate
                // Operators at statement start produce the same
                // expression errors as anywhere else.
                | TokenType::Add
                | TokenType::Sub
                | TokenType::Mul
                | TokenType::Div
                | TokenType::Pow
                | TokenType::CloseParen => self.stmt(),
                TokenType::Word | TokenType::Equals | TokenType::Error => {
                    self.unexpected_start();
                }
            }

            if self.pos == start {
                // stuck on a last token that is not a line break
                self.pos = self.tokens.len();
            }
        }
    }

    /// Diagnose a token that cannot begin a statement, then drop the
    /// rest of its line.
    fn unexpected_start(&mut self) {
        let Some(token) = self.current() else {
            return;
        };

        match &token.kind {
            TokenKind::Word(word) => self.callbacks.on_error(Error::at(
                ErrorKind::UnknownCommand(word.clone()),
                token.span,
            )),
            TokenKind::Error(kind) => self.report_lex_error(kind, token),
            _ => self
                .callbacks
                .on_error(Error::at(ErrorKind::DidYouMeanLet, token.span)),
        }

        self.synchronize();
    }

    fn stmt(&mut self) {
        log::trace!("stmt()");

        match self.token_type() {
            TokenType::StatementLet => self.let_stmt(),
            TokenType::StatementReset => self.reset_stmt(),
            TokenType::StatementVars => self.vars_stmt(),
            TokenType::StatementClear => self.clear_stmt(),
            TokenType::StatementExit => self.exit_stmt(),
            _ => self.expr_stmt(),
        }
    }

    fn let_stmt(&mut self) {
        log::trace!("let_stmt()");

        self.consume(TokenType::StatementLet);

        let variable = self.var(false);

        let equals = self.consume(TokenType::Equals);
        self.symbol(equals);

        let value = self.number(false);

        let terminated = self.newline();

        self.callbacks.on_let(variable, value, terminated);
    }

    fn reset_stmt(&mut self) {
        log::trace!("reset_stmt()");

        let consumed = self.consume(TokenType::StatementReset).is_some();
        let terminated = self.newline();
        self.callbacks.on_reset(consumed && terminated);
    }

    fn vars_stmt(&mut self) {
        log::trace!("vars_stmt()");

        let consumed = self.consume(TokenType::StatementVars).is_some();
        let terminated = self.newline();
        self.callbacks.on_vars(consumed && terminated);
    }

    fn clear_stmt(&mut self) {
        log::trace!("clear_stmt()");

        let consumed = self.consume(TokenType::StatementClear).is_some();
        self.newline();
        if consumed {
            self.callbacks.on_clear();
        }
    }

    fn exit_stmt(&mut self) {
        log::trace!("exit_stmt()");

        let consumed = self.consume(TokenType::StatementExit).is_some();
        self.newline();
        if consumed {
            self.callbacks.on_exit();
        }
    }

    fn expr_stmt(&mut self) {
        log::trace!("expr_stmt()");

        self.callbacks.on_expr_begin(true);

        self.expr();

        // an expression ends at the line break
        let terminated = self.newline();

        self.callbacks.on_expr_end(terminated);
    }

    fn expr(&mut self) {
        log::trace!("expr()");

        self.term();

        while matches!(self.token_type(), TokenType::Add | TokenType::Sub) {
            let op = self.consume(self.token_type());
            self.symbol(op);
            self.term();
        }
    }

    fn term(&mut self) {
        log::trace!("term()");

        self.factor();

        while matches!(self.token_type(), TokenType::Mul | TokenType::Div) {
            let op = self.consume(self.token_type());
            self.symbol(op);
            self.factor();
        }
    }

    fn factor(&mut self) {
        log::trace!("factor()");

        self.base();

        while self.token_type() == TokenType::Pow {
            let op = self.consume(TokenType::Pow);
            self.symbol(op);
            self.factor();
        }
    }

    fn base(&mut self) {
        log::trace!("base()");

        match self.token_type() {
            TokenType::OpenParen => {
                let open = self.consume(TokenType::OpenParen);
                self.symbol(open);

                self.expr();

                let close = self.consume(TokenType::CloseParen);
                self.symbol(close);
            }
            TokenType::Negate => {
                self.negate(true);
                self.term();
            }
            TokenType::Variable => {
                self.var(true);
            }
            TokenType::Number => {
                self.number(true);
            }
            _ => {}
        }
    }

    fn var(&mut self, evaluate: bool) -> Option<char> {
        log::trace!("var()");

        let letter = self.consume(TokenType::Variable).and_then(|t| match t.kind {
            TokenKind::Variable(letter) => Some(letter),
            _ => None,
        });

        if evaluate {
            self.callbacks.on_variable(letter);
        }
        letter
    }

    /// A number with its optional leading negation already applied.
    fn number(&mut self, evaluate: bool) -> Option<f64> {
        log::trace!("number()");

        let negative = self.token_type() == TokenType::Negate;
        if negative {
            self.negate(evaluate);
        }

        let value = self.consume(TokenType::Number).and_then(|t| match t.kind {
            TokenKind::Number(value) if negative => Some(-value),
            TokenKind::Number(value) => Some(value),
            _ => None,
        });

        if evaluate {
            self.callbacks.on_number(value);
        }
        value
    }

    fn negate(&mut self, evaluate: bool) {
        log::trace!("negate()");

        let negate = self.consume(TokenType::Negate);
        if evaluate {
            self.symbol(negate);
        }
    }

    fn newline(&mut self) -> bool {
        log::trace!("newline()");

        let newline = self.consume(TokenType::Newline);
        self.symbol(newline);
        newline.is_some()
    }
}
