use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
};

/// Evaluates `==`, `!=`, `<`, `<=`, `>` and `>=`.
///
/// Equality is defined for:
/// - `null`, which equals only `null` and is unequal to every other value,
/// - numbers, compared after promotion so `1 == 1.0`,
/// - booleans and strings, compared by value.
///
/// Ordering is defined for numbers only.
///
/// # Errors
/// `TypeMismatch` for any other pair of operands, lists included.
///
/// # Example
/// ```
/// use morgana::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::binary::comparison::eval_comparison,
/// };
///
/// let result = eval_comparison(BinaryOperator::Equal, &Expr::Null, &Expr::Integer(1)).unwrap();
/// assert_eq!(result.to_string(), "false");
/// ```
pub fn eval_comparison(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Expr> {
    let mismatch = || RuntimeError::TypeMismatch { operator: op.symbol(),
                                                   left:     left.explain(),
                                                   right:    right.explain(), };

    let result = match op {
        BinaryOperator::Equal => values_equal(left, right).ok_or_else(mismatch)?,
        BinaryOperator::NotEqual => !values_equal(left, right).ok_or_else(mismatch)?,
        _ => {
            let (Some(a), Some(b)) = (Number::from_expr(left), Number::from_expr(right)) else {
                return Err(mismatch());
            };
            let ordering = a.compare(b);
            match op {
                BinaryOperator::Less => ordering == Ordering::Less,
                BinaryOperator::LessEqual => ordering != Ordering::Greater,
                BinaryOperator::Greater => ordering == Ordering::Greater,
                BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                _ => return Err(mismatch()),
            }
        },
    };

    Ok(Expr::Bool(result))
}

/// Compares two values for equality, or `None` if equality is not defined
/// between them.
fn values_equal(left: &Expr, right: &Expr) -> Option<bool> {
    match (left, right) {
        (Expr::Null, Expr::Null) => Some(true),
        (Expr::Null, _) | (_, Expr::Null) => Some(false),
        (Expr::Bool(a), Expr::Bool(b)) => Some(a == b),
        (Expr::Str(a), Expr::Str(b)) => Some(a == b),
        _ => {
            let (a, b) = (Number::from_expr(left)?, Number::from_expr(right)?);
            Some(a.compare(b) == Ordering::Equal)
        },
    }
}
