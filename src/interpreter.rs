//! Interpreter session: statement handlers and expression evaluation
//! wired to the parser's callbacks.

use crate::builder::Config;
use crate::error::{Error, ErrorKind};
use crate::expression::Expression;
use crate::memory::VariableStore;
use crate::parser::{self, Callbacks};

/// One observable result of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// `LET` stored a value.
    Assigned {
        variable: char,
        value: f64,
    },
    /// `RESET` cleared every variable.
    Reset,
    /// `VARS` listing, set variables only, alphabetical.
    Variables(Vec<(char, f64)>),
    /// Result of an expression statement.
    Value(f64),
    Error(Error),
    /// `CLEAR` asks the front end to clear the terminal.
    Clear,
    /// `EXIT` asks the front end to end the session.
    Exit,
}

impl Output {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// A single interpreter session owning the variable store and the
/// per-statement expression state.
#[derive(Debug, Clone)]
pub struct Interpreter {
    config: Config,
    memory: VariableStore,
    expression: Expression,
    outputs: Vec<Output>,
    running: bool,
}

impl Interpreter {
    /// Session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let expression =
            Expression::with_capacity(config.buffer_capacity, config.operator_stack_capacity);
        Self {
            config,
            memory: VariableStore::new(),
            expression,
            outputs: Vec::new(),
            running: true,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn variables(&self) -> &VariableStore {
        &self.memory
    }

    /// False once an `EXIT` statement ran.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Tokenize, parse and evaluate one line of input.
    pub fn execute(&mut self, line: &str) -> Vec<Output> {
        log::debug!("execute: {line:?}");
        parser::parse_str(line, self);
        std::mem::take(&mut self.outputs)
    }

    fn report(&mut self, kind: ErrorKind) {
        self.outputs.push(Output::Error(kind.into()));
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Callbacks for Interpreter {
    fn on_let(&mut self, variable: Option<char>, value: Option<f64>, terminated: bool) {
        if variable.is_none() {
            self.report(ErrorKind::LetVariableNotSet);
        }
        if value.is_none() {
            self.report(ErrorKind::LetValueNotSet);
        }
        if !terminated {
            self.report(ErrorKind::LetInvalidParams);
        }

        let (Some(variable), Some(value), true) = (variable, value, terminated) else {
            return;
        };
        let Some(index) = VariableStore::index_of(variable) else {
            self.report(ErrorKind::LetVariableNotSet);
            return;
        };

        self.memory.set(index, value);
        self.outputs.push(Output::Assigned { variable, value });
    }

    fn on_reset(&mut self, ok: bool) {
        if !ok {
            self.report(ErrorKind::ResetInvalidParams);
            return;
        }
        self.memory.reset();
        self.outputs.push(Output::Reset);
    }

    fn on_vars(&mut self, ok: bool) {
        if !ok {
            self.report(ErrorKind::VarsInvalidParams);
            return;
        }
        self.outputs
            .push(Output::Variables(self.memory.iter_set().collect()));
    }

    fn on_clear(&mut self) {
        self.outputs.push(Output::Clear);
    }

    fn on_exit(&mut self) {
        self.running = false;
        self.outputs.push(Output::Exit);
    }

    fn on_expr_begin(&mut self, ok: bool) {
        if ok {
            self.expression.reset();
        }
    }

    fn on_expr_end(&mut self, ok: bool) {
        if !ok {
            self.expression.fail(ErrorKind::ExprGeneric);
        }

        match self.expression.finish(&self.memory) {
            Ok(value) => self.outputs.push(Output::Value(value)),
            // already reported where the variable was referenced
            Err(ErrorKind::ExprVariableNotSet(_)) => {}
            Err(kind) => self.report(kind),
        }

        self.expression.reset();
    }

    fn on_variable(&mut self, letter: Option<char>) {
        let Some(letter) = letter else {
            return;
        };
        if let Err(kind) = self.expression.push_variable(letter, &self.memory) {
            self.report(kind);
        }
    }

    fn on_number(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.expression.push_number(value);
        }
    }

    fn on_symbol(&mut self, symbol: Option<char>) {
        if let Some(symbol) = symbol {
            self.expression.push_symbol(symbol);
        }
    }

    fn on_error(&mut self, error: Error) {
        if error.kind.is_syntax_mismatch() && !self.config.report_syntax_errors {
            log::debug!("syntax: {error}");
            return;
        }
        self.outputs.push(Output::Error(error));
    }
}

/// Prepare a raw input line: keep at most `max_length` characters,
/// strip the line terminator and fold to upper case.
#[must_use]
pub fn normalize_line(raw: &str, max_length: usize) -> String {
    raw.trim_end_matches(['\n', '\r'])
        .chars()
        .take(max_length)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(interpreter: &mut Interpreter, line: &str) -> Vec<Output> {
        interpreter.execute(line)
    }

    #[test]
    fn let_then_reference() {
        let mut interp = Interpreter::new();
        assert_eq!(
            run(&mut interp, "LET A = 5"),
            vec![Output::Assigned {
                variable: 'A',
                value: 5.0
            }]
        );
        assert_eq!(run(&mut interp, "A*2"), vec![Output::Value(10.0)]);
    }

    #[test]
    fn malformed_let_leaves_store_untouched() {
        let mut interp = Interpreter::new();
        let out = run(&mut interp, "LET = 5");
        assert_eq!(
            out,
            vec![
                Output::Error(Error::new(ErrorKind::LetVariableNotSet)),
                Output::Error(Error::new(ErrorKind::LetValueNotSet)),
            ]
        );
        assert_eq!(interp.variables().count_set(), 0);
        assert_eq!(
            run(&mut interp, "LET B = 1"),
            vec![Output::Assigned {
                variable: 'B',
                value: 1.0
            }]
        );
    }

    #[test]
    fn let_with_extra_value() {
        let mut interp = Interpreter::new();
        let out = run(&mut interp, "LET A = 1 2");
        assert_eq!(
            out,
            vec![Output::Error(Error::new(ErrorKind::LetInvalidParams))]
        );
        assert_eq!(interp.variables().count_set(), 0);
    }

    #[test]
    fn unset_variable_reported_once() {
        let mut interp = Interpreter::new();
        run(&mut interp, "LET A = 1");
        let out = run(&mut interp, "A+B");
        let expected = Error::new(ErrorKind::ExprVariableNotSet('B'));
        assert_eq!(out, vec![Output::Error(expected)]);
    }

    #[test]
    fn reset_and_vars() {
        let mut interp = Interpreter::new();
        run(&mut interp, "LET C = 3");
        run(&mut interp, "LET A = 1");
        assert_eq!(
            run(&mut interp, "VARS"),
            vec![Output::Variables(vec![('A', 1.0), ('C', 3.0)])]
        );
        assert_eq!(run(&mut interp, "RESET"), vec![Output::Reset]);
        assert_eq!(run(&mut interp, "VARS"), vec![Output::Variables(vec![])]);
    }

    #[test]
    fn statement_params_rejected() {
        let mut interp = Interpreter::new();
        assert_eq!(
            run(&mut interp, "RESET 1"),
            vec![Output::Error(Error::new(ErrorKind::ResetInvalidParams))]
        );
        assert_eq!(
            run(&mut interp, "VARS A"),
            vec![Output::Error(Error::new(ErrorKind::VarsInvalidParams))]
        );
    }

    #[test]
    fn exit_stops_session() {
        let mut interp = Interpreter::new();
        assert!(interp.is_running());
        assert_eq!(run(&mut interp, "EXIT"), vec![Output::Exit]);
        assert!(!interp.is_running());
    }

    #[test]
    fn clear_requests_side_effect() {
        let mut interp = Interpreter::new();
        assert_eq!(run(&mut interp, "CLEAR"), vec![Output::Clear]);
    }

    #[test]
    fn syntax_mismatch_hidden_by_default() {
        let mut interp = Interpreter::new();
        let out = run(&mut interp, "(1+2");
        assert_eq!(
            out,
            vec![Output::Error(Error::new(ErrorKind::ExprOpenParen))]
        );

        let mut verbose = Interpreter::builder().report_syntax_errors(true).build();
        let out = run(&mut verbose, "(1+2");
        let Output::Error(error) = &out[0] else {
            panic!("expected an error, got {:?}", out[0]);
        };
        assert!(error.kind.is_syntax_mismatch());
    }

    #[test]
    fn trailing_tokens_make_expression_generic() {
        let mut interp = Interpreter::new();
        assert_eq!(
            run(&mut interp, "1+2)"),
            vec![Output::Error(Error::new(ErrorKind::ExprGeneric))]
        );
    }

    #[test]
    fn unterminated_expression_overrides_earlier_error() {
        let mut interp = Interpreter::new();
        assert_eq!(
            run(&mut interp, "B)"),
            vec![
                Output::Error(Error::new(ErrorKind::ExprVariableNotSet('B'))),
                Output::Error(Error::new(ErrorKind::ExprGeneric)),
            ]
        );
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_line("let a = 1\n", 79), "LET A = 1");
        assert_eq!(normalize_line("abcdef", 3), "ABC");
    }
}
