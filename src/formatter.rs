//! Renders interpreter outputs as the text lines shown to the user.

use crate::error::Error;
use crate::interpreter::Output;

/// Header printed before a `VARS` listing.
pub const VARS_HEADER: &str =
    "Please note: The list below only displays variables that have an associated value.";

/// Printed by `VARS` when nothing is set.
pub const VARS_EMPTY: &str = "*** None of the variables available [A-Z] are set! ***";

/// Printed by `RESET`.
pub const RESET_DONE: &str = "Resetting all variables... Done.";

/// Format one output as newline-terminated text.
///
/// `Clear` and `Exit` carry no text; the front end acts on them.
#[must_use]
pub fn format(output: &Output, precision: usize) -> String {
    let mut out = String::new();

    match output {
        Output::Assigned { variable, value } => {
            push_assignment(&mut out, *variable, *value, precision);
        }
        Output::Reset => push_line(&mut out, RESET_DONE),
        Output::Variables(vars) => {
            push_line(&mut out, VARS_HEADER);
            if vars.is_empty() {
                push_line(&mut out, VARS_EMPTY);
            }
            for (variable, value) in vars {
                push_assignment(&mut out, *variable, *value, precision);
            }
        }
        Output::Value(value) => push_line(&mut out, &format_number(*value, precision)),
        Output::Error(error) => push_line(&mut out, &format_error(error)),
        Output::Clear | Output::Exit => {}
    }

    out
}

/// Format a sequence of outputs, in order.
#[must_use]
pub fn format_all(outputs: &[Output], precision: usize) -> String {
    outputs.iter().map(|o| format(o, precision)).collect()
}

/// Fixed-point rendering with `precision` decimal digits.
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// `*** ERROR: (<code>) <message>`
#[must_use]
pub fn format_error(error: &Error) -> String {
    format!("*** ERROR: ({}) {error}", error.code())
}

fn push_assignment(out: &mut String, variable: char, value: f64, precision: usize) {
    out.push(variable);
    out.push_str(" = ");
    push_line(out, &format_number(value, precision));
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
