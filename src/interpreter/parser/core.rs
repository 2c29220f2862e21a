use std::rc::Rc;

use log::trace;

use crate::{
    ast::{ArgumentSlot, Expr, Lambda, display::LOWEST},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Spanned, Token},
        parser::{
            binary::parse_infix,
            unary::parse_value,
            utils::{expect_expression, missing},
        },
        scope::Scope,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete source text as one expression.
///
/// This is the entry point for parsing. Every token must belong to the
/// expression.
///
/// # Parameters
/// - `tokens`: Token stream over the whole source.
/// - `scope`: Scope used to resolve identifiers, usually a global scope.
///
/// # Returns
/// The parsed expression.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the source is empty.
/// - `UnexpectedToken` if tokens remain after the expression.
/// - Propagates any error from the expression itself.
pub fn parse_program(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Expr> {
    let Some(expr) = parse_expression(tokens, scope, LOWEST)? else {
        return Err(match tokens.peek()? {
                       Some(spanned) => ParseError::UnexpectedToken { location: spanned.location.clone() },
                       None => ParseError::UnexpectedEndOfInput { expected: "an expression" },
                   });
    };

    if let Some(spanned) = tokens.peek()? {
        return Err(ParseError::UnexpectedToken { location: spanned.location.clone() });
    }

    Ok(expr)
}

/// Parses an expression whose operators bind at least as tightly as
/// `min_precedence`.
///
/// The expression starts with a single value and is then extended by
/// [`parse_infix`] with operators and applications.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the expression.
/// - `scope`: Scope used to resolve identifiers.
/// - `min_precedence`: Minimum binding strength of operators consumed.
///
/// # Returns
/// `None` when no expression can begin at the current position, which lets
/// callers treat a trailing clause as optional.
///
/// # Errors
/// `NestingTooDeep` if expressions nest more than
/// [`MAX_NESTING`](crate::interpreter::lexer::MAX_NESTING) deep, through
/// parentheses, lists, lambda bodies or right operands.
pub fn parse_expression(tokens: &mut Lexer<'_>,
                        scope: &Rc<Scope>,
                        min_precedence: u8)
                        -> ParseResult<Option<Expr>> {
    tokens.descend()?;
    let parsed = parse_nested(tokens, scope, min_precedence);
    tokens.ascend();
    parsed
}

fn parse_nested(tokens: &mut Lexer<'_>, scope: &Rc<Scope>, min_precedence: u8) -> ParseResult<Option<Expr>> {
    let Some(first) = parse_value(tokens, scope)? else {
        return Ok(None);
    };
    let first = first.into_single()?;

    parse_infix(tokens, scope, first, min_precedence).map(Some)
}

/// Parses an `if` expression.
///
/// Syntax:
/// ```text
///     if <condition> then <expr> else <expr>
/// ```
/// All three parts are required. Each extends as far as possible, so
/// `if c then 1 else 2 + 3` adds 3 in the else branch only.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
/// - `scope`: Scope used to resolve identifiers.
///
/// # Returns
/// An `Expr::If` node.
///
/// # Errors
/// - `ExpectedToken` if `then`, `else` or a branch is missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Expr> {
    tokens.advance()?;

    let condition = expect_expression(tokens, scope, LOWEST, "a condition")?;
    tokens.expect(&Token::Then, "'then'")?;
    let then_branch = expect_expression(tokens, scope, LOWEST, "an expression after 'then'")?;
    tokens.expect(&Token::Else, "'else'")?;
    let else_branch = expect_expression(tokens, scope, LOWEST, "an expression after 'else'")?;

    Ok(Expr::If { condition:   Rc::new(condition),
                  then_branch: Rc::new(then_branch),
                  else_branch: Rc::new(else_branch), })
}

/// Parses a lambda `\x y -> body`.
///
/// The parameters are bound in a fresh child scope, each to an argument slot
/// naming the lambda's depth and the parameter's position, and the body is
/// parsed in that scope. The body extends as far as possible.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `\`.
/// - `scope`: Enclosing scope.
///
/// # Returns
/// An `Expr::Lambda` node.
///
/// # Errors
/// - `ExpectedToken` if a token other than a parameter or `->` follows `\`,
///   or if the lambda declares no parameters.
/// - `UnexpectedEndOfInput` if the input ends before the body.
pub fn parse_lambda(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Expr> {
    tokens.advance()?;

    let inner = Scope::child(scope);
    let depth = inner.depth();
    let mut parameters: Vec<String> = Vec::new();

    loop {
        match tokens.peek()? {
            Some(Spanned { token: Token::Identifier(name),
                           .. }) => {
                let slot = ArgumentSlot { depth,
                                          index: parameters.len(),
                                          name: name.clone() };
                inner.define(name, Expr::Argument(Rc::new(slot)));
                parameters.push(name.clone());
                tokens.advance()?;
            },
            Some(Spanned { token: Token::Arrow,
                           location, }) => {
                if parameters.is_empty() {
                    return Err(ParseError::ExpectedToken { expected: "a parameter",
                                                           location: location.clone() });
                }
                tokens.advance()?;
                break;
            },
            _ => return Err(missing(tokens, "a parameter or '->'")?),
        }
    }

    let body = expect_expression(tokens, &inner, LOWEST, "a lambda body")?;
    trace!("lambda at depth {depth} with parameters {parameters:?}");

    Ok(Expr::Lambda(Rc::new(Lambda { depth,
                                     parameters,
                                     body })))
}
