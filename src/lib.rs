//! # morgana
//!
//! morgana is a small, dynamically typed expression language written in
//! Rust. It parses and evaluates expressions with curried functions,
//! lambdas, string interpolation and lazy, possibly infinite, lists, and
//! stops cooperatively when a deadline passes.
//!
//! ```
//! use morgana::{get_result, EvalOptions};
//!
//! let result = get_result(r"take 3 $ map (\x -> x * x) [1..]", &EvalOptions::default());
//! assert_eq!(result.unwrap(), "[1, 4, 9]");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{rc::Rc, time::Duration};

use log::debug;

use crate::{
    ast::Expr,
    error::{Error, ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, lexer::Lexer, parser::core::parse_program, scope::Scope},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent
/// expressions as a tree. The same type represents the values evaluation
/// produces. The AST is built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression variants for all language constructs.
/// - Defines operators with their precedence and associativity.
/// - Renders expressions back into source text that parses again.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source locations for caret-style diagnostics.
/// - Distinguishes cancellation from every other failure.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, name resolution, evaluation and
/// value representations to provide a complete runtime for expressions.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, scope, evaluator, and
///   value types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and text handling.
///
/// This module provides reusable helpers used throughout the interpreter:
/// checked conversions between decimals and machine integers, string
/// escaping, decimal formatting, and the lenient boolean parser.
pub mod util;

/// Options for a one-shot evaluation request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    /// Time allowed before the evaluation is cancelled; `None` for no limit.
    pub timeout: Option<Duration>,
}

/// Parses source text against a fresh global scope holding the built-in
/// functions.
///
/// # Errors
/// Returns a `ParseError` if the text is not exactly one valid expression,
/// including when it names an identifier that is not defined.
///
/// # Examples
/// ```
/// use morgana::parse;
///
/// assert!(parse("map (+ 1) [1, 2, 3]").is_ok());
/// assert!(parse("undefined_name + 1").is_err());
/// ```
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with(source, &Scope::with_builtins())
}

/// Parses source text, resolving identifiers against `scope`.
///
/// Use this with a scope on which additional functions were registered.
///
/// # Errors
/// See [`parse`].
pub fn parse_with(source: &str, scope: &Rc<Scope>) -> Result<Expr, ParseError> {
    let mut tokens = Lexer::new(source);
    parse_program(&mut tokens, scope)
}

/// Evaluates an expression under a fresh context, then applies it to
/// `arguments`.
///
/// The result is the value itself: lazy lists are returned as views and
/// are not traversed. Use [`Context::render`] to print them materialized.
///
/// # Errors
/// Returns a `RuntimeError` if evaluation fails.
pub fn evaluate(expr: &Expr, arguments: &[Expr]) -> Result<Expr, RuntimeError> {
    expr.evaluate(&Context::new(), arguments)
}

/// Parses and evaluates source text, returning the rendered result.
///
/// Finite lists in the result are materialized; strings are rendered with
/// quotes, so the result parses back to the same value.
///
/// # Errors
/// Returns an error if parsing or evaluation fails, or if the evaluation
/// runs past `options.timeout`, in which case [`Error::is_timeout`] holds.
///
/// # Examples
/// ```
/// use morgana::{get_result, EvalOptions};
///
/// assert_eq!(get_result("(1 + 2) * 3", &EvalOptions::default()).unwrap(), "9");
///
/// // 'x' is not defined
/// assert!(get_result("x + 1", &EvalOptions::default()).is_err());
/// ```
pub fn get_result(source: &str, options: &EvalOptions) -> Result<String, Error> {
    let expr = parse(source)?;
    let context = Context::new();
    let _deadline = options.timeout.map(|timeout| context.token().cancel_after(timeout));

    debug!("evaluating {expr}");
    let value = context.eval(&expr, None)?;
    Ok(context.render(&value)?)
}

/// Parses and evaluates source text, cancelling the evaluation once
/// `timeout` has elapsed.
///
/// # Errors
/// `Error::Runtime(RuntimeError::Cancelled)` on timeout, otherwise as
/// [`get_result`].
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use morgana::evaluate_with_deadline;
///
/// let error = evaluate_with_deadline(r"head (filter (\x -> x < 0) [1..])",
///                                    Duration::from_millis(50)).unwrap_err();
/// assert!(error.is_timeout());
/// ```
pub fn evaluate_with_deadline(source: &str, timeout: Duration) -> Result<String, Error> {
    get_result(source, &EvalOptions { timeout: Some(timeout) })
}
