use std::rc::Rc;

use crate::{
    ast::{Expr, UnaryOperator, display::LOWEST},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Location, Spanned, Token},
        parser::{
            binary::{parse_infix, token_to_binary_operator},
            core::{ParseResult, parse_if, parse_lambda},
            list::parse_list,
            string::parse_interpolated,
            utils::{expect_expression, missing},
        },
        scope::Scope,
    },
};

/// The result of parsing a single value.
///
/// A parenthesised, comma-separated group is only meaningful as the argument
/// list of an application, so it is returned separately and rejected
/// everywhere else.
#[derive(Debug)]
pub enum Parsed {
    /// An ordinary value.
    Single(Expr),
    /// A group `(a, b, ...)` of two or more expressions.
    Group {
        /// The grouped expressions in order.
        items: Vec<Expr>,
        /// Location of the first comma, for error reporting.
        comma: Location,
    },
}

impl Parsed {
    /// Returns the value, rejecting a group.
    ///
    /// # Errors
    /// `UnexpectedToken` at the group's first comma.
    pub fn into_single(self) -> ParseResult<Expr> {
        match self {
            Self::Single(expr) => Ok(expr),
            Self::Group { comma, .. } => Err(ParseError::UnexpectedToken { location: comma }),
        }
    }
}

/// Parses a single value.
///
/// Values are literals, identifiers, interpolated strings, list literals,
/// parenthesised expressions and sections, lambdas, `if` expressions, and
/// any of these prefixed by `-` or `!`.
///
/// Identifiers are resolved against `scope` immediately.
///
/// Grammar:
/// ```text
///     value := ("-" | "!") value
///            | literal | identifier | list | "(" ... ")" | lambda | if
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned at the value.
/// - `scope`: Scope used to resolve identifiers.
///
/// # Returns
/// `None` if the next token cannot begin a value; the token is left in place.
///
/// # Errors
/// - `UndefinedIdentifier` if a name is not bound in any enclosing scope.
/// - Propagates errors from nested constructs.
pub fn parse_value(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Option<Parsed>> {
    let Some(token) = tokens.peek_token()? else {
        return Ok(None);
    };

    let expr = match token {
        Token::Integer(n) => {
            tokens.advance()?;
            Expr::Integer(n)
        },
        Token::Decimal(d) => {
            tokens.advance()?;
            Expr::Decimal(d)
        },
        Token::Bool(b) => {
            tokens.advance()?;
            Expr::Bool(b)
        },
        Token::Null => {
            tokens.advance()?;
            Expr::Null
        },
        Token::Str(text) => {
            tokens.advance()?;
            Expr::string(&text)
        },
        Token::ParsedStr(body) => {
            let Spanned { location, .. } = tokens.advance()?;
            parse_interpolated(&body, &location, scope)?
        },
        Token::Identifier(name) => {
            let Spanned { location, .. } = tokens.advance()?;
            scope.lookup(&name)
                 .ok_or(ParseError::UndefinedIdentifier { name, location })?
        },
        Token::Minus => {
            tokens.advance()?;
            parse_unary(tokens, scope, UnaryOperator::Negate)?
        },
        Token::Bang => {
            tokens.advance()?;
            parse_unary(tokens, scope, UnaryOperator::Not)?
        },
        Token::LParen => return parse_parenthesized(tokens, scope).map(Some),
        Token::LBracket => parse_list(tokens, scope)?,
        Token::Backslash => parse_lambda(tokens, scope)?,
        Token::If => parse_if(tokens, scope)?,
        _ => return Ok(None),
    };

    Ok(Some(Parsed::Single(expr)))
}

/// Parses the operand of a prefix operator, which is a single value.
///
/// `-f x` is therefore `(-f) x`, and `- -x` negates twice.
///
/// # Errors
/// - `ExpectedToken` or `UnexpectedEndOfInput` if no operand follows.
/// - `UnexpectedToken` if the operand is a comma group.
fn parse_unary(tokens: &mut Lexer<'_>, scope: &Rc<Scope>, op: UnaryOperator) -> ParseResult<Expr> {
    tokens.descend()?;
    let operand = parse_value(tokens, scope);
    tokens.ascend();
    let Some(operand) = operand? else {
        return Err(missing(tokens, "an operand")?);
    };
    Ok(Expr::Unary { op,
                     operand: Rc::new(operand.into_single()?) })
}

/// Parses everything that starts with `(`.
///
/// - `(- x)` is negation, followed by any further operators: `(- x + 1)` is
///   `(-x) + 1`.
/// - `(op x)` for any other binary operator is a right section.
/// - `(x op)` is a left section, produced by [`parse_infix`] when the right
///   operand is missing.
/// - `(a, b, ...)` is a group.
/// - Anything else is a parenthesised expression.
///
/// # Errors
/// - `ExpectedToken` if the closing `)` or a required operand is missing.
/// - `UnexpectedEndOfInput` if the input ends inside the parentheses.
fn parse_parenthesized(tokens: &mut Lexer<'_>, scope: &Rc<Scope>) -> ParseResult<Parsed> {
    tokens.advance()?;

    let Some(token) = tokens.peek_token()? else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "an expression" });
    };

    if token == Token::Minus {
        tokens.advance()?;
        let negated = parse_unary(tokens, scope, UnaryOperator::Negate)?;
        let expr = parse_infix(tokens, scope, negated, LOWEST)?;
        tokens.expect(&Token::RParen, "')'")?;
        return Ok(Parsed::Single(expr));
    }

    if let Some(op) = token_to_binary_operator(&token) {
        tokens.advance()?;
        let right = expect_expression(tokens, scope, LOWEST, "an operand")?;
        tokens.expect(&Token::RParen, "')'")?;
        return Ok(Parsed::Single(Expr::RightSection { op,
                                                      right: Rc::new(right) }));
    }

    let first = expect_expression(tokens, scope, LOWEST, "an expression")?;
    let mut items = vec![first];
    let mut comma = None;

    while let Some(Spanned { token: Token::Comma,
                             location, }) = tokens.peek()?
    {
        let location = location.clone();
        tokens.advance()?;
        comma.get_or_insert(location);
        items.push(expect_expression(tokens, scope, LOWEST, "an expression after ','")?);
    }

    tokens.expect(&Token::RParen, "')'")?;

    match comma {
        Some(comma) => Ok(Parsed::Group { items, comma }),
        None => Ok(Parsed::Single(items.remove(0))),
    }
}
