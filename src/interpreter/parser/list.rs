use std::rc::Rc;

use crate::{
    ast::{Expr, display::LOWEST},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_expression, missing},
        },
        scope::Scope,
    },
};

/// Parses a list literal or a range.
///
/// Grammar:
/// ```text
///     list  := "[" "]"
///            | "[" expression ("," expression)* "]"
///            | "[" expression ("," expression)? ".." expression? "]"
/// ```
/// In a range, a second value fixes the step and the value after `..` is the
/// inclusive end. Without an end the range is infinite.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `[`.
/// - `scope`: Scope used to resolve identifiers.
///
/// # Returns
/// A finite list of unevaluated elements, or an `Expr::Range` node.
///
/// # Errors
/// - `TooManyRangeValues` if more than two values precede `..`.
/// - `ExpectedToken` if an element, `,` or `]` is missing.
pub fn parse_list(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Expr> {
    tokens.advance()?;

    if let Some(Token::RBracket) = tokens.peek_token()? {
        tokens.advance()?;
        return Ok(Expr::list(Vec::new()));
    }

    let mut items = Vec::new();
    loop {
        items.push(expect_expression(tokens, scope, LOWEST, "a list element")?);

        match tokens.peek()? {
            Some(Spanned { token: Token::Comma,
                           .. }) => {
                tokens.advance()?;
            },
            Some(Spanned { token: Token::RBracket,
                           .. }) => {
                tokens.advance()?;
                return Ok(Expr::list(items));
            },
            Some(Spanned { token: Token::DotDot,
                           location, }) => {
                if items.len() > 2 {
                    return Err(ParseError::TooManyRangeValues { count:    items.len(),
                                                                location: location.clone(), });
                }
                tokens.advance()?;
                return parse_range(tokens, scope, items);
            },
            _ => return Err(missing(tokens, "',' or ']'")?),
        }
    }
}

/// Parses the optional end of a range after `..` and the closing `]`.
fn parse_range(tokens: &mut Lexer<'_>, scope: &Rc<Scope>, items: Vec<Expr>) -> ParseResult<Expr> {
    let end = parse_expression(tokens, scope, LOWEST)?;
    tokens.expect(&Token::RBracket, "']'")?;

    let mut items = items.into_iter().map(Rc::new);
    let Some(start) = items.next() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "a range start" });
    };

    Ok(Expr::Range { start,
                     second: items.next(),
                     end: end.map(Rc::new) })
}
