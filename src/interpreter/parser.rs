/// Entry points and the precedence-climbing expression loop.
///
/// Contains the top-level parse that requires the whole input to form one
/// expression, juxtaposition and `$` application, and the `if` and lambda
/// forms.
pub mod core;

/// Prefix operators and single values.
///
/// Parses literals, identifiers, parenthesised expressions and operator
/// sections, and the prefix operators `-` and `!`.
pub mod unary;

/// Binary operators.
///
/// Maps operator tokens to [`crate::ast::BinaryOperator`]s and climbs the
/// precedence table.
pub mod binary;

/// List literals and ranges.
pub mod list;

/// Interpolated strings.
///
/// Splits the body of a `p"..."` literal into text and embedded expressions.
pub mod string;

/// Utility functions for the parser.
///
/// Provides helpers for required sub-expressions and error construction.
pub mod utils;
