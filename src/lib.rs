#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::missing_errors_doc
)]

//! Sciculator, the engine of a scientific calculator.
//!
//! This crate evaluates mathematical expressions embedded in strings, against
//! a closed set of operators, functions and constants: nothing outside of
//! them is ever executed. The easiest way to use this crate is with the
//! [`eval`](fn.eval.html) function:
//!
//! ```
//! assert_eq!(sciculator::eval("3 + 5 * 2"), Ok(13.0));
//! assert_eq!(sciculator::eval("2 ** 10"), Ok(1024.0));
//! ```
//!
//! An [`Evaluator`](struct.Evaluator.html) remembers the result of its last
//! successful evaluation, available as `ans`:
//!
//! ```
//! use sciculator::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate("2 + 2"), Ok(4.0));
//! assert_eq!(evaluator.evaluate("ans ** 2"), Ok(16.0));
//! ```
//!
//! Trigonometric functions work in radians. The [`rewrite`](fn.rewrite.html)
//! function converts an expression written in degrees, and the
//! [`Calculator`](struct.Calculator.html) type chains rewriting, evaluation
//! and [`format`](fn.format.html)ting:
//!
//! ```
//! use sciculator::{Calculator, rewrite};
//!
//! assert_eq!(rewrite("sin(30)", true), "sin(radians(30))");
//!
//! let mut calculator = Calculator::new();
//! assert_eq!(calculator.calculate_formatted("sin(30)"), Ok("0.5".into()));
//! assert_eq!(calculator.calculate_formatted("asin(1)"), Ok("90".into()));
//! ```
//!
//! # Language definition
//!
//! The language implemented by sciculator can contain the following elements:
//!
//! - number literals: `12`, `0.5`, `.5`, `1e-3`, `1_000`, and the integer
//!   literals `0x1f`, `0o17`, `0b101`;
//! - left and right parenthesis;
//! - mathematical operators: `+` and `-` (binary and unary), `*`, `/`,
//!   `//` for floor division, `%` for modulo (with the sign of the divisor),
//!   and `**` for exponentiation, which is right associative and binds
//!   tighter than unary minus (`-2**2 == -4`);
//! - constants: `pi`, `e`, `tau`, `inf` and `ans`, the last result;
//! - function calls: `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `sinh`,
//!   `cosh`, `tanh`, `asinh`, `acosh`, `atanh`, `log` (base 10), `ln`,
//!   `log2`, `sqrt`, `abs`, `factorial`, `ceil`, `floor`, `degrees`,
//!   `radians`, all taking a single argument, and `round(x)` or
//!   `round(x, ndigits)`.
//!
//! The bitwise operators `|`, `^`, `&`, `<<`, `>>` and `~` are recognized by
//! the parser but not supported by the evaluator. Any other symbol is
//! forbidden in the input.
//!
//! All the computations use `f64`. Operations which are undefined for their
//! operands (division by zero, `sqrt(-1)`, `factorial(2.5)`, overflowing
//! powers...) are reported as errors instead of producing `NaN` or
//! infinities.
//!
//! # Technical details
//!
//! sciculator is based on an AST interpreter, with a precedence climbing
//! parser. It logs through [`tracing`](https://docs.rs/tracing), and does
//! not install any subscriber.

#[macro_use]
extern crate lazy_static;

mod angle;
mod ast;
mod calculator;
mod error;
mod expr;
mod format;
mod lexer;
mod ops;
mod parser;
mod token;
mod util;

pub use angle::{rewrite, AngleMode};
pub use ast::{Ast, BinaryOp, UnaryOp};
pub use calculator::Calculator;
pub use error::{Error, ErrorKind};
pub use expr::{eval, Evaluator, Expr};
pub use format::{format, prettify};
pub use lexer::is_identifier;
pub use util::{Function, ANS, CONSTANTS, FUNCTIONS};
