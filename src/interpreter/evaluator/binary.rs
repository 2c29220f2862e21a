/// Dispatch over binary operators, including short-circuit evaluation.
pub mod core;

/// Arithmetic on numbers and string concatenation.
pub mod scalar;

/// Equality and ordering.
pub mod comparison;

/// Logical `&&` and `||` on evaluated operands.
pub mod logic;

/// List concatenation and prepending.
pub mod list;
