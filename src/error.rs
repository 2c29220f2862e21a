use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while lexing or parsing source
/// text: malformed literals, unterminated strings, unrecognised characters,
/// unexpected or missing tokens, and identifiers that are not in scope. Each
/// carries the offending token's location so it can be pretty-printed with a
/// caret marker.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types raised while evaluating an expression: type
/// mismatches, failed casts, domain errors such as summing an infinite list,
/// and cancellation.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of a one-shot parse-and-evaluate request.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed or was cancelled.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Whether the request was cancelled, typically by its deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Runtime(RuntimeError::Cancelled))
    }
}
