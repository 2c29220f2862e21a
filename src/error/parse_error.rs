use thiserror::Error;

use crate::interpreter::lexer::Location;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant that has an offending token carries its [`Location`]; an
/// error raised at the end of input has none. [`ParseError::pretty`] renders
/// the location as a caret marker under the source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No token matches the input at this position.
    #[error("Error on line {}: Unrecognized character '{character}' (U+{code_point:04X}).", .location.line)]
    UnrecognizedCharacter {
        /// The character.
        character:  char,
        /// Its Unicode code point.
        code_point: u32,
        /// Where it was found.
        location:   Location,
    },
    /// A string literal has no closing quote on its line.
    #[error("Error on line {}: Unterminated string literal.", .location.line)]
    UnterminatedString {
        /// The string literal up to the point of failure.
        location: Location,
    },
    /// A string literal contains a backslash escape the language lacks.
    #[error("Error on line {}: Invalid escape sequence '\\{escape}'.", .location.line)]
    InvalidEscape {
        /// The character following the backslash.
        escape:   char,
        /// The string literal up to the escape.
        location: Location,
    },
    /// A numeric literal does not fit its type.
    #[error("Error on line {}: Malformed numeric literal '{}'.", .location.line, .location.text)]
    MalformedNumber {
        /// The literal.
        location: Location,
    },
    /// A token appeared where it cannot be used.
    #[error("Error on line {}: Unexpected token '{}'.", .location.line, .location.text)]
    UnexpectedToken {
        /// The token.
        location: Location,
    },
    /// A specific token or construct was required but another token was
    /// found.
    #[error("Error on line {}: Expected {expected} but found '{}'.", .location.line, .location.text)]
    ExpectedToken {
        /// Description of what was required.
        expected: &'static str,
        /// The token found instead.
        location: Location,
    },
    /// The input ended while something was still required.
    #[error("Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// Description of what was required.
        expected: &'static str,
    },
    /// An identifier is not bound in any enclosing scope.
    #[error("Error on line {}: Undefined identifier '{name}'.", .location.line)]
    UndefinedIdentifier {
        /// The identifier.
        name:     String,
        /// Where it was used.
        location: Location,
    },
    /// A range literal lists more than two values before `..`.
    #[error("Error on line {}: A range takes at most two values before '..', but found {count}.", .location.line)]
    TooManyRangeValues {
        /// Number of values listed.
        count:    usize,
        /// The `..` token.
        location: Location,
    },
    /// An interpolated string contains a malformed `${...}` marker.
    #[error("Error on line {}: Invalid interpolation: {reason}", .location.line)]
    InvalidInterpolation {
        /// What went wrong.
        reason:   String,
        /// The interpolated string literal.
        location: Location,
    },
    /// Parentheses, lists, lambdas or prefix operators nest deeper than the
    /// parser allows.
    #[error("Expression nested more than {limit} levels deep.")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:    usize,
        /// The token that would have opened one more level.
        location: Location,
    },
    /// `advance` was called without a token pending from `peek`.
    #[error("Internal error: advance called without a pending token.")]
    NothingPeeked,
}

impl ParseError {
    /// The location of the offending token, if there is one.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::UnrecognizedCharacter { location, .. }
            | Self::UnterminatedString { location }
            | Self::InvalidEscape { location, .. }
            | Self::MalformedNumber { location }
            | Self::UnexpectedToken { location }
            | Self::ExpectedToken { location, .. }
            | Self::UndefinedIdentifier { location, .. }
            | Self::TooManyRangeValues { location, .. }
            | Self::InvalidInterpolation { location, .. }
            | Self::NestingTooDeep { location, .. } => Some(location),
            Self::UnexpectedEndOfInput { .. } | Self::NothingPeeked => None,
        }
    }

    /// Renders the error with its source line and a caret marker.
    ///
    /// The result has three lines: the message, the offending source line
    /// with its indentation removed, and a line of carets under the token.
    /// Errors without a location render as the bare message.
    ///
    /// # Example
    /// ```
    /// use morgana::parse;
    ///
    /// let error = parse("1 + missing").unwrap_err();
    /// assert_eq!(error.pretty(),
    ///            "Error on line 1: Undefined identifier 'missing'.\n    1 + missing\n        ^^^^^^^");
    /// ```
    #[must_use]
    pub fn pretty(&self) -> String {
        let Some(location) = self.location() else {
            return self.to_string();
        };
        let line = location.line_text.trim_end();
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let offset = line.get(indent..location.column.saturating_sub(1))
                         .map_or(0, |prefix| prefix.chars().count());
        let width = location.text.chars().count().max(1);

        format!("{self}\n    {trimmed}\n    {}{}",
                " ".repeat(offset),
                "^".repeat(width))
    }
}
