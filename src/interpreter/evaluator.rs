/// Core evaluation logic for expressions and values.
///
/// Contains the evaluation context, the dispatch over expression variants,
/// and rendering of results.
pub mod core;

/// Function application.
///
/// Supplies arguments one at a time to native functions, closures, partial
/// applications and operator sections, invoking them once their arity is met.
pub mod apply;

/// Cooperative cancellation.
///
/// Provides the token checked at every evaluation step and the timer that
/// cancels it after a deadline.
pub mod cancel;

/// Unary operator evaluation.
///
/// Handles negation and logical not.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations, including arithmetic,
/// comparisons, logical operators and list construction.
pub mod binary;

/// Built-in functions.
///
/// Defines the standard library registered into every global scope created
/// with [`crate::interpreter::scope::Scope::with_builtins`].
pub mod function;

/// Utility functions for the evaluator.
///
/// Provides argument checks shared by the built-in functions.
pub mod utils;
