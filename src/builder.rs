use crate::expression::{DEFAULT_BUFFER_CAPACITY, DEFAULT_STACK_CAPACITY};
use crate::interpreter::Interpreter;

/// Decimal digits printed for results (`DBL_DIG`).
pub const DEFAULT_PRECISION: usize = 15;

/// Longest input line accepted by the front end.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of the postfix output buffer of one expression.
    pub buffer_capacity: usize,
    /// Capacity of the shunting-yard operator stack.
    pub operator_stack_capacity: usize,
    /// Fixed decimal digits used when printing numbers.
    pub precision: usize,
    /// Emit expected-vs-got diagnostics instead of only logging them.
    pub report_syntax_errors: bool,
    /// Input lines are truncated to this many characters.
    pub max_line_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            operator_stack_capacity: DEFAULT_STACK_CAPACITY,
            precision: DEFAULT_PRECISION,
            report_syntax_errors: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Builder for an [`Interpreter`] session.
#[derive(Debug, Clone, Default)]
pub struct InterpreterBuilder {
    config: Config,
}

impl InterpreterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the postfix buffer capacity.
    #[must_use]
    pub const fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Set the operator stack capacity.
    #[must_use]
    pub const fn operator_stack_capacity(mut self, capacity: usize) -> Self {
        self.config.operator_stack_capacity = capacity;
        self
    }

    /// Set the number of decimal digits printed.
    #[must_use]
    pub const fn precision(mut self, digits: usize) -> Self {
        self.config.precision = digits;
        self
    }

    /// Report expected-vs-got syntax diagnostics as outputs.
    #[must_use]
    pub const fn report_syntax_errors(mut self, report: bool) -> Self {
        self.config.report_syntax_errors = report;
        self
    }

    /// Set the maximum input line length.
    #[must_use]
    pub const fn max_line_length(mut self, length: usize) -> Self {
        self.config.max_line_length = length;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn build(self) -> Interpreter {
        Interpreter::with_config(self.config)
    }
}

impl Interpreter {
    /// Start configuring a new session.
    #[must_use]
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.buffer_capacity, 128);
        assert_eq!(config.operator_stack_capacity, 32);
        assert_eq!(config.precision, 15);
        assert!(!config.report_syntax_errors);
        assert_eq!(config.max_line_length, 79);
    }

    #[test]
    fn builder_sets_fields() {
        let builder = InterpreterBuilder::new()
            .buffer_capacity(16)
            .operator_stack_capacity(4)
            .precision(2)
            .report_syntax_errors(true)
            .max_line_length(10);
        assert_eq!(
            builder.config(),
            &Config {
                buffer_capacity: 16,
                operator_stack_capacity: 4,
                precision: 2,
                report_syntax_errors: true,
                max_line_length: 10,
            }
        );
        let interpreter = builder.build();
        assert_eq!(interpreter.config().precision, 2);
    }
}
