use rust_decimal::Decimal;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
};

/// Evaluates `+`, `-`, `*`, `/` and `%`.
///
/// Two integers give an integer; if either operand is a decimal the
/// operation is carried out in decimal. `+` on two strings concatenates them.
///
/// Integer `+`, `-` and `*` wrap around on overflow. Integer `/` truncates
/// toward zero and `%` takes the sign of the dividend.
///
/// # Errors
/// - `DivisionByZero` for `/` or `%` by zero.
/// - `Overflow` if a decimal result is out of range.
/// - `TypeMismatch` for any other pair of operands.
///
/// # Example
/// ```
/// use morgana::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::binary::scalar::eval_arithmetic,
/// };
///
/// let sum = eval_arithmetic(BinaryOperator::Add, &Expr::Integer(1), &Expr::Integer(1)).unwrap();
/// assert_eq!(sum.to_string(), "2");
///
/// let text = eval_arithmetic(BinaryOperator::Add, &Expr::string("a"), &Expr::string("b")).unwrap();
/// assert_eq!(text.to_string(), "\"ab\"");
/// ```
pub fn eval_arithmetic(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Expr> {
    if let (BinaryOperator::Add, Expr::Str(a), Expr::Str(b)) = (op, left, right) {
        return Ok(Expr::string(&format!("{a}{b}")));
    }

    let (Some(a), Some(b)) = (Number::from_expr(left), Number::from_expr(right)) else {
        return Err(RuntimeError::TypeMismatch { operator: op.symbol(),
                                                left:     left.explain(),
                                                right:    right.explain(), });
    };

    match a.promote(b) {
        (Number::Integer(a), Number::Integer(b)) => integer_arithmetic(op, a, b).map(Expr::Integer),
        (a, b) => decimal_arithmetic(op, a.to_decimal(), b.to_decimal()).map(Expr::Decimal),
    }
}

fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64) -> EvalResult<i64> {
    match op {
        BinaryOperator::Add => Ok(a.wrapping_add(b)),
        BinaryOperator::Sub => Ok(a.wrapping_sub(b)),
        BinaryOperator::Mul => Ok(a.wrapping_mul(b)),
        BinaryOperator::Div if b == 0 => Err(RuntimeError::DivisionByZero),
        BinaryOperator::Div => Ok(a.wrapping_div(b)),
        BinaryOperator::Mod if b == 0 => Err(RuntimeError::DivisionByZero),
        BinaryOperator::Mod => Ok(a.wrapping_rem(b)),
        _ => Err(RuntimeError::TypeMismatch { operator: op.symbol(),
                                              left:     format!("integer {a}"),
                                              right:    format!("integer {b}"), }),
    }
}

fn decimal_arithmetic(op: BinaryOperator, a: Decimal, b: Decimal) -> EvalResult<Decimal> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b.is_zero() => return Err(RuntimeError::DivisionByZero),
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => {
            return Err(RuntimeError::TypeMismatch { operator: op.symbol(),
                                                    left:     format!("decimal {a}"),
                                                    right:    format!("decimal {b}"), });
        },
    };
    result.ok_or(RuntimeError::Overflow { operator: op.symbol() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOperator, left: Expr, right: Expr) -> EvalResult<Expr> {
        eval_arithmetic(op, &left, &right)
    }

    #[test]
    fn promotion() {
        let result = apply(BinaryOperator::Add, Expr::Integer(1), Expr::Decimal(Decimal::new(15, 1))).unwrap();
        assert!(matches!(result, Expr::Decimal(d) if d == Decimal::new(25, 1)));
    }

    #[test]
    fn integer_overflow_wraps() {
        let result = apply(BinaryOperator::Add, Expr::Integer(i64::MAX), Expr::Integer(1)).unwrap();
        assert!(matches!(result, Expr::Integer(i64::MIN)));
    }

    #[test]
    fn division() {
        assert!(matches!(apply(BinaryOperator::Div, Expr::Integer(-7), Expr::Integer(2)), Ok(Expr::Integer(-3))));
        assert!(matches!(apply(BinaryOperator::Mod, Expr::Integer(-7), Expr::Integer(2)), Ok(Expr::Integer(-1))));
        assert_eq!(apply(BinaryOperator::Div, Expr::Integer(1), Expr::Integer(0)).unwrap_err(),
                   RuntimeError::DivisionByZero);
        assert_eq!(apply(BinaryOperator::Mod, Expr::Decimal(Decimal::ONE), Expr::Integer(0)).unwrap_err(),
                   RuntimeError::DivisionByZero);
    }

    #[test]
    fn mismatched_operands() {
        let error = apply(BinaryOperator::Add, Expr::Integer(1), Expr::Bool(true)).unwrap_err();
        assert_eq!(error.to_string(), "Type error: cannot apply '+' to integer 1 and boolean true.");
        assert!(apply(BinaryOperator::Sub, Expr::string("a"), Expr::string("b")).is_err());
    }
}
