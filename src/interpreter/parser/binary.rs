use std::rc::Rc;

use log::trace;

use crate::{
    ast::{BinaryOperator, Expr, display::LOWEST},
    interpreter::{
        lexer::{Lexer, Token},
        parser::{
            core::ParseResult,
            unary::{Parsed, parse_value},
            utils::expect_expression,
        },
        scope::Scope,
    },
};

/// Continues an expression after its first value.
///
/// Repeatedly extends `left` with whichever of these the next token allows:
///
/// 1. A binary operator binding at least as tightly as `min_precedence`. Its
///    right operand is parsed one level tighter for left-associative
///    operators and at the same level for right-associative ones. An
///    operator followed directly by `)` ends a whole parenthesised
///    expression as a left section such as `(3 +)`; anywhere else a missing
///    right operand is an error.
/// 2. At the lowest level only, `$` followed by the rest of the input as an
///    argument.
/// 3. Juxtaposition: any value that follows is applied to `left`. A
///    parenthesised group `(a, b)` supplies each element as a separate
///    argument.
///
/// # Parameters
/// - `tokens`: Token stream positioned after `left`.
/// - `scope`: Scope used to resolve identifiers.
/// - `left`: The expression parsed so far.
/// - `min_precedence`: Minimum binding strength of operators consumed.
///
/// # Returns
/// The extended expression.
///
/// # Errors
/// - `ExpectedToken` or `UnexpectedEndOfInput` if an operator has no right
///   operand outside of a left section.
/// - Propagates errors from the operands.
pub fn parse_infix(tokens: &mut Lexer<'_>,
                   scope: &Rc<Scope>,
                   mut left: Expr,
                   min_precedence: u8)
                   -> ParseResult<Expr> {
    loop {
        let Some(token) = tokens.peek_token()? else {
            break;
        };

        if let Some(op) = token_to_binary_operator(&token) {
            if op.precedence() < min_precedence {
                break;
            }
            tokens.advance()?;
            trace!("binary operator '{op}'");

            if min_precedence == LOWEST && tokens.peek_token()? == Some(Token::RParen) {
                return Ok(Expr::LeftSection { op,
                                              left: Rc::new(left) });
            }
            let right = expect_expression(tokens, scope, op.right_precedence(), "an operand")?;
            left = Expr::binary(op, left, right);
            continue;
        }

        if token == Token::Dollar {
            if min_precedence != LOWEST {
                break;
            }
            tokens.advance()?;
            let argument = expect_expression(tokens, scope, LOWEST, "an argument after '$'")?;
            trace!("'$' application");
            left = Expr::call(left, argument);
            continue;
        }

        match parse_value(tokens, scope)? {
            Some(Parsed::Single(argument)) => {
                trace!("application by juxtaposition");
                left = Expr::call(left, argument);
            },
            Some(Parsed::Group { items, .. }) => {
                trace!("application to {} grouped arguments", items.len());
                for argument in items {
                    left = Expr::call(left, argument);
                }
            },
            None => break,
        }
    }

    Ok(left)
}

/// Maps a token to the binary operator it denotes, if any.
///
/// # Parameters
/// - `token`: The token to inspect.
///
/// # Returns
/// `Some(BinaryOperator)` for operator tokens, `None` otherwise.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::DoublePipe => Some(BinaryOperator::Or),
        Token::DoubleAmpersand => Some(BinaryOperator::And),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::PlusPlus => Some(BinaryOperator::Concat),
        Token::Colon => Some(BinaryOperator::Prepend),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}
