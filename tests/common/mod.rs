#![allow(dead_code)]

use pqc::{Interpreter, Output, Token, TokenType, format_all, tokenize};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Token types of a line, including the trailing `Newline`/`EndOfInput`.
pub fn types(input: &str) -> Vec<TokenType> {
    tokenize(input).iter().map(Token::token_type).collect()
}

/// Run every line in one session and collect all outputs in order.
pub fn session(lines: &[&str]) -> Vec<Output> {
    init_logging();
    let mut interp = Interpreter::new();
    lines.iter().flat_map(|line| interp.execute(line)).collect()
}

/// Formatted text of a session at the default precision.
pub fn transcript(lines: &[&str]) -> String {
    format_all(&session(lines), 15)
}

/// Numeric codes of the error outputs, in order.
pub fn error_codes(outputs: &[Output]) -> Vec<u8> {
    outputs
        .iter()
        .filter_map(|o| match o {
            Output::Error(e) => Some(e.code()),
            _ => None,
        })
        .collect()
}

/// The single value produced by evaluating `line` after `setup`.
pub fn value_of(setup: &[&str], line: &str) -> Option<f64> {
    let mut interp = Interpreter::new();
    for l in setup {
        interp.execute(l);
    }
    match interp.execute(line).as_slice() {
        [Output::Value(v)] => Some(*v),
        _ => None,
    }
}
