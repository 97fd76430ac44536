//! End-to-end session behaviour.

mod common;

use common::{error_codes, session, value_of};
use pqc::{Error, ErrorKind, Interpreter, Output};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(value_of(&[], "2+3*4"), Some(14.0));
    assert_eq!(value_of(&[], "(2+3)*4"), Some(20.0));
    assert_eq!(value_of(&[], "2^3^2"), Some(512.0));
    assert_eq!(value_of(&[], "10-4-3"), Some(3.0));
    assert_eq!(value_of(&[], "-2^2"), Some(4.0));
}

#[test]
fn variables_round_trip() {
    let value = value_of(&["LET A = 1.5", "LET B = -2"], "A*B+A");
    assert!(value.is_some_and(|v| close(v, -1.5)));
}

#[test]
fn lowercase_input_is_folded_by_the_front_end() {
    let mut interp = Interpreter::new();
    let line = pqc::normalize_line("let q = 7", interp.config().max_line_length);
    interp.execute(&line);
    assert_eq!(interp.variables().lookup('Q'), Some(7.0));
}

#[test]
fn divide_by_zero_has_no_value() {
    let out = session(&["1/0"]);
    assert_eq!(
        out,
        vec![Output::Error(Error::new(ErrorKind::ExprDivideByZero))]
    );
    assert_eq!(error_codes(&session(&["LET Z = 0", "5/Z"])), vec![20]);
    assert_eq!(error_codes(&session(&["1/(0.1+0.2-0.3)"])), vec![20]);
}

#[test]
fn unset_variable_reported_once() {
    let out = session(&["LET A = 1", "A+B"]);
    assert_eq!(out.len(), 2);
    assert_eq!(error_codes(&out), vec![19]);
    assert!(!out.iter().any(|o| matches!(o, Output::Value(_))));
}

#[test]
fn malformed_line_then_recovery() {
    let mut interp = Interpreter::new();
    interp.execute("LET B = 9");
    let before = interp.variables().clone();
    let out = interp.execute("LET = 5");
    assert_eq!(error_codes(&out), vec![9, 10]);
    assert_eq!(interp.variables(), &before);
    assert_eq!(interp.execute("B+1"), vec![Output::Value(10.0)]);
}

#[test]
fn buffer_overflow_is_classified() {
    let mut interp = Interpreter::builder().buffer_capacity(8).build();
    let out = interp.execute("1+1+1+1+1+1+1+1+1");
    assert_eq!(error_codes(&out), vec![15]);

    let long = ["1"; 100].join("+");
    let out = session(&[long.as_str()]);
    assert_eq!(error_codes(&out), vec![15]);
}

#[test]
fn nested_parentheses_overflow_stack() {
    let mut interp = Interpreter::builder().operator_stack_capacity(3).build();
    let out = interp.execute("((((1))))");
    assert_eq!(error_codes(&out), vec![15]);
}

#[test]
fn unbalanced_parentheses() {
    assert_eq!(error_codes(&session(&["(1+2"])), vec![16]);
    assert_eq!(error_codes(&session(&["((1)"])), vec![16]);
    assert_eq!(error_codes(&session(&["B)"])), vec![19, 14]);
}

#[test]
fn empty_parentheses_are_generic() {
    assert_eq!(error_codes(&session(&["()"])), vec![14]);
}

#[test]
fn dangling_operator() {
    assert_eq!(error_codes(&session(&["1+"])), vec![18]);
    assert_eq!(error_codes(&session(&["-"])), vec![17]);
}

#[test]
fn vars_lists_only_set_variables() {
    let out = session(&["LET Z = 26", "LET A = 1", "VARS"]);
    assert_eq!(
        out.last(),
        Some(&Output::Variables(vec![('A', 1.0), ('Z', 26.0)]))
    );
}

#[test]
fn reset_clears_store() {
    let mut interp = Interpreter::new();
    interp.execute("LET A = 1");
    interp.execute("RESET");
    assert_eq!(interp.variables().count_set(), 0);
    assert_eq!(error_codes(&interp.execute("A")), vec![19]);
}

#[test]
fn statement_keyword_errors() {
    assert_eq!(error_codes(&session(&["HELLO"])), vec![4]);
    assert_eq!(error_codes(&session(&["= 5"])), vec![5]);
    assert_eq!(error_codes(&session(&["5 = 3"])), vec![5]);
    assert_eq!(error_codes(&session(&["LET A = 1 2"])), vec![11]);
    assert_eq!(error_codes(&session(&["RESET NOW"])), vec![12]);
    assert_eq!(error_codes(&session(&["VARS 1"])), vec![13]);
}

#[test]
fn lexer_errors_surface_with_their_message() {
    let out = session(&["LET A = 1.2.3"]);
    let Some(Output::Error(first)) = out.first() else {
        panic!("expected an error, got {out:?}");
    };
    assert_eq!(first.code(), 7);
    assert_eq!(first.to_string(), "Extra decimal point in '1.2.'.");
    assert_eq!(error_codes(&out), vec![7, 10]);
}

#[test]
fn verbose_syntax_reports_mismatch() {
    let mut interp = Interpreter::builder().report_syntax_errors(true).build();
    let out = interp.execute("LET A 5");
    assert_eq!(error_codes(&out), vec![8, 8, 10]);
}

#[test]
fn multi_line_input_in_one_call() {
    let mut interp = Interpreter::new();
    let out = interp.execute("LET A = 2\nA*A\nEXIT\nA");
    assert_eq!(
        out,
        vec![
            Output::Assigned {
                variable: 'A',
                value: 2.0
            },
            Output::Value(4.0),
            Output::Exit,
            Output::Value(2.0),
        ]
    );
    assert!(!interp.is_running());
}
