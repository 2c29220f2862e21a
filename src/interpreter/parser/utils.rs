use std::rc::Rc;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Lexer,
        parser::core::{ParseResult, parse_expression},
        scope::Scope,
    },
};

/// Parses an expression that must be present.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the expression.
/// - `scope`: Scope used to resolve identifiers.
/// - `min_precedence`: Minimum binding strength of operators consumed.
/// - `expected`: Description used if no expression begins here.
///
/// # Errors
/// - `ExpectedToken` if the next token cannot begin an expression.
/// - `UnexpectedEndOfInput` if the input ends.
/// - Propagates errors from the expression itself.
pub(in crate::interpreter::parser) fn expect_expression(tokens: &mut Lexer<'_>,
                                                        scope: &Rc<Scope>,
                                                        min_precedence: u8,
                                                        expected: &'static str)
                                                        -> ParseResult<Expr> {
    match parse_expression(tokens, scope, min_precedence)? {
        Some(expr) => Ok(expr),
        None => Err(missing(tokens, expected)?),
    }
}

/// Builds the error for a required construct that is absent at the current
/// position.
///
/// # Errors
/// Only fails if peeking the next token itself fails.
pub(in crate::interpreter::parser) fn missing(tokens: &mut Lexer<'_>,
                                              expected: &'static str)
                                              -> ParseResult<ParseError> {
    Ok(match tokens.peek()? {
        Some(spanned) => ParseError::ExpectedToken { expected,
                                                     location: spanned.location.clone() },
        None => ParseError::UnexpectedEndOfInput { expected },
    })
}
