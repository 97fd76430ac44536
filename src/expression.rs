//! Infix-to-postfix conversion and evaluation of expression statements.
//!
//! The parser reports operands and symbols one at a time while it walks
//! an expression. [`Expression`] turns that stream into postfix form
//! with the shunting-yard algorithm and evaluates the result with a
//! value stack once the statement ends.

use std::fmt;

use crate::error::ErrorKind;
use crate::memory::VariableStore;

/// Default capacity of the postfix output buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 128;

/// Default capacity of the operator stack.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// Arithmetic operators, binary and unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Negate,
    Pow,
    Mul,
    Div,
    Add,
    Sub,
}

impl Operator {
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '~' => Some(Self::Negate),
            '^' => Some(Self::Pow),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Negate => '~',
            Self::Pow => '^',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Add => '+',
            Self::Sub => '-',
        }
    }

    /// Operator-stack priority; an open parenthesis ranks 0.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Negate => 4,
            Self::Pow => 3,
            Self::Mul | Self::Div => 2,
            Self::Add | Self::Sub => 1,
        }
    }

    /// Right-associative operators do not pop an equal-priority top.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Negate | Self::Pow)
    }

    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Negate)
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, ErrorKind> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Sub => Ok(lhs - rhs),
            Self::Mul => Ok(lhs * rhs),
            Self::Div if rhs.abs() < f64::EPSILON => Err(ErrorKind::ExprDivideByZero),
            Self::Div => Ok(lhs / rhs),
            Self::Pow => Ok(lhs.powf(rhs)),
            Self::Negate => Ok(-rhs),
        }
    }
}

/// One element of a postfix (RPN) expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostfixItem {
    Operator(Operator),
    Variable(char),
    Number(f64),
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::Variable(letter) => write!(f, "{letter}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    OpenParen,
    Operator(Operator),
}

/// Per-statement accumulator: operator stack, postfix output and the
/// first error classified while the statement was being read.
#[derive(Debug, Clone)]
pub struct Expression {
    operators: Vec<StackEntry>,
    output: Vec<PostfixItem>,
    error: Option<ErrorKind>,
    buffer_capacity: usize,
    stack_capacity: usize,
}

impl Expression {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, DEFAULT_STACK_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(buffer_capacity: usize, stack_capacity: usize) -> Self {
        Self {
            operators: Vec::with_capacity(stack_capacity),
            output: Vec::with_capacity(buffer_capacity),
            error: None,
            buffer_capacity,
            stack_capacity,
        }
    }

    /// Discard all state from the previous statement.
    pub fn reset(&mut self) {
        self.operators.clear();
        self.output.clear();
        self.error = None;
    }

    /// Postfix items accumulated so far.
    #[must_use]
    pub fn postfix(&self) -> &[PostfixItem] {
        &self.output
    }

    /// Record an error; the first classification wins.
    pub fn classify(&mut self, kind: ErrorKind) {
        if self.error.is_none() {
            self.error = Some(kind);
        }
    }

    /// Record an error, replacing any earlier classification.
    pub fn fail(&mut self, kind: ErrorKind) {
        self.error = Some(kind);
    }

    /// Feed a symbol reported by the parser. Anything that is neither
    /// a parenthesis nor an operator (`=`, newline) is ignored.
    pub fn push_symbol(&mut self, symbol: char) {
        if self.error.is_some() {
            return;
        }

        match symbol {
            '(' => self.push_entry(StackEntry::OpenParen),
            ')' => self.close_paren(),
            _ => {
                if let Some(op) = Operator::from_symbol(symbol) {
                    self.push_operator(op);
                }
            }
        }
    }

    /// Feed a variable reference.
    ///
    /// # Errors
    ///
    /// Returns `ExprVariableNotSet` when the variable has no value, so
    /// the caller can report it right away. The accumulator is marked
    /// errored as well.
    pub fn push_variable(&mut self, letter: char, store: &VariableStore) -> Result<(), ErrorKind> {
        if store.lookup(letter).is_none() {
            let kind = ErrorKind::ExprVariableNotSet(letter);
            self.classify(kind.clone());
            return Err(kind);
        }
        if self.error.is_none() {
            self.append(PostfixItem::Variable(letter));
        }
        Ok(())
    }

    pub fn push_number(&mut self, value: f64) {
        if self.error.is_none() {
            self.append(PostfixItem::Number(value));
        }
    }

    /// Drain the operator stack and evaluate the postfix form.
    ///
    /// # Errors
    ///
    /// Returns the first error classified during accumulation, or the
    /// error found while draining or evaluating.
    pub fn finish(&mut self, store: &VariableStore) -> Result<f64, ErrorKind> {
        if self.error.is_none() {
            while let Some(entry) = self.operators.pop() {
                match entry {
                    StackEntry::OpenParen => {
                        self.classify(ErrorKind::ExprOpenParen);
                        break;
                    }
                    StackEntry::Operator(op) => self.append(PostfixItem::Operator(op)),
                }
            }
        }

        if let Some(kind) = &self.error {
            return Err(kind.clone());
        }

        log::debug!("rpn: {}", render_postfix(&self.output));

        evaluate(&self.output, store)
    }

    /// At most `buffer_capacity - 1` items fit.
    fn append(&mut self, item: PostfixItem) {
        if self.output.len() + 1 >= self.buffer_capacity {
            self.classify(ErrorKind::ExprBufferOverflow);
            return;
        }
        self.output.push(item);
    }

    fn push_entry(&mut self, entry: StackEntry) {
        if self.operators.len() >= self.stack_capacity {
            self.classify(ErrorKind::ExprBufferOverflow);
            return;
        }
        self.operators.push(entry);
    }

    fn push_operator(&mut self, op: Operator) {
        while let Some(&StackEntry::Operator(top)) = self.operators.last() {
            let pops = top.priority() > op.priority()
                || (top.priority() == op.priority() && !op.is_right_associative());
            if !pops {
                break;
            }
            self.operators.pop();
            self.append(PostfixItem::Operator(top));
        }
        self.push_entry(StackEntry::Operator(op));
    }

    fn close_paren(&mut self) {
        loop {
            match self.operators.pop() {
                Some(StackEntry::OpenParen) => return,
                Some(StackEntry::Operator(op)) => self.append(PostfixItem::Operator(op)),
                None => {
                    self.classify(ErrorKind::ExprOpenParen);
                    return;
                }
            }
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

/// Space-separated postfix form, for logging.
#[must_use]
pub fn render_postfix(items: &[PostfixItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluate a postfix expression against the variable store.
///
/// # Errors
///
/// `ExprExtraOperator` when an operator finds no operand at all,
/// `ExprMissingOperand` when a binary operator finds only one,
/// `ExprDivideByZero` for a divisor within epsilon of zero,
/// `ExprVariableNotSet` for an unset variable and `ExprGeneric`
/// unless exactly one value remains at the end.
pub fn evaluate(items: &[PostfixItem], store: &VariableStore) -> Result<f64, ErrorKind> {
    let mut stack: Vec<f64> = Vec::with_capacity(items.len());

    for item in items {
        match *item {
            PostfixItem::Number(value) => stack.push(value),
            PostfixItem::Variable(letter) => {
                let value = store
                    .lookup(letter)
                    .ok_or(ErrorKind::ExprVariableNotSet(letter))?;
                stack.push(value);
            }
            PostfixItem::Operator(op) => {
                let rhs = stack.pop().ok_or(ErrorKind::ExprExtraOperator)?;
                let result = if op.is_unary() {
                    op.apply(0.0, rhs)?
                } else {
                    let lhs = stack.pop().ok_or(ErrorKind::ExprMissingOperand)?;
                    op.apply(lhs, rhs)?
                };
                stack.push(result);
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(ErrorKind::ExprGeneric),
    }
}
