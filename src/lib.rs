//! PQC: a small line-oriented calculator language.
//!
//! Twenty-six variables `A`..`Z` hold double-precision numbers.
//! Statements assign (`LET`), clear (`RESET`), list (`VARS`) or
//! evaluate arithmetic expressions with `+ - * / ^`, parentheses and
//! unary minus.
//!
//! # Quick start
//!
//! ## Run a session
//!
//! ```
//! use pqc::{Interpreter, Output};
//!
//! let mut interp = Interpreter::new();
//! interp.execute("LET A = 2");
//! let outputs = interp.execute("A ^ 3 + 1");
//! assert_eq!(outputs, vec![Output::Value(9.0)]);
//! ```
//!
//! ## Format results
//!
//! ```
//! use pqc::{Interpreter, format_all};
//!
//! let mut interp = Interpreter::builder().precision(2).build();
//! let text = format_all(&interp.execute("LET B = 1.5\n1/0"), 2);
//! assert_eq!(text, "B = 1.50\n*** ERROR: (20) Divide by zero.\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod builder;
pub mod error;
pub mod expression;
pub mod formatter;
pub mod interpreter;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod token;

pub use builder::{Config, InterpreterBuilder};
pub use error::{Error, ErrorKind};
pub use expression::{Expression, Operator, PostfixItem, evaluate};
pub use formatter::{format, format_all};
pub use interpreter::{Interpreter, Output, normalize_line};
pub use lexer::tokenize;
pub use memory::VariableStore;
pub use parser::{Callbacks, parse, parse_str};
pub use token::{Span, Token, TokenKind, TokenType};
