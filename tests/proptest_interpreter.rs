//! Property-based tests with proptest.
//!
//! Generate random letters, values and small integer expressions and
//! check them against what Rust computes directly.

mod common;

use pqc::{Interpreter, Output};
use proptest::prelude::*;

fn letter() -> impl Strategy<Value = char> {
    (b'A'..=b'Z').prop_map(char::from)
}

/// Decimal literals the lexer reads back exactly.
fn literal() -> impl Strategy<Value = (String, f64)> {
    (0u32..100_000, 0u32..1000).prop_map(|(int, frac)| {
        let text = format!("{int}.{frac:03}");
        let value: f64 = text.parse().unwrap_or_default();
        (text, value)
    })
}

proptest! {
    /// `LET x = v` followed by `x` yields `v`.
    #[test]
    fn let_then_reference(var in letter(), (text, value) in literal(), negative in any::<bool>()) {
        let mut interp = Interpreter::new();
        let sign = if negative { "-" } else { "" };
        let expected = if negative { -value } else { value };

        let out = interp.execute(&format!("LET {var} = {sign}{text}"));
        prop_assert_eq!(out, vec![Output::Assigned { variable: var, value: expected }]);

        let out = interp.execute(&var.to_string());
        prop_assert_eq!(out, vec![Output::Value(expected)]);
    }

    /// RESET leaves no variable set, whatever was assigned before.
    #[test]
    fn reset_clears_everything(
        assignments in prop::collection::vec((letter(), 0u32..1000), 0..30),
    ) {
        let mut interp = Interpreter::new();
        for (var, value) in &assignments {
            interp.execute(&format!("LET {var} = {value}"));
        }
        prop_assert_eq!(interp.execute("RESET"), vec![Output::Reset]);
        prop_assert_eq!(interp.variables().count_set(), 0);
        prop_assert_eq!(interp.execute("VARS"), vec![Output::Variables(vec![])]);
    }

    /// An even number of leading minus signs cancels out.
    #[test]
    fn double_negation_cancels(pairs in 1usize..5, n in 0u32..1000) {
        let mut interp = Interpreter::new();
        let minus = "--".repeat(pairs);
        let out = interp.execute(&format!("{minus}{n}"));
        prop_assert_eq!(out, vec![Output::Value(f64::from(n))]);
    }

    /// Integer arithmetic agrees with Rust's own.
    #[test]
    fn integer_arithmetic(a in 0i32..1000, b in 0i32..1000, c in 1i32..1000) {
        let mut interp = Interpreter::new();
        let out = interp.execute(&format!("{a}+{b}*{c}-{a}"));
        prop_assert_eq!(out, vec![Output::Value(f64::from(a + b * c - a))]);

        let out = interp.execute(&format!("({a}-{b})*{c}"));
        prop_assert_eq!(out, vec![Output::Value(f64::from((a - b) * c))]);
    }

    /// Arbitrary printable input never panics and always yields some
    /// output or none, never a stuck parser.
    #[test]
    fn arbitrary_lines_terminate(line in "[ -~]{0,40}") {
        common::init_logging();
        let mut interp = Interpreter::new();
        let _ = interp.execute(&line);
    }
}
