use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Evaluates a unary operation on an evaluated operand.
///
/// - `-` negates integers (wrapping) and decimals.
/// - `!` casts its operand to boolean and inverts it.
///
/// # Errors
/// - `InvalidOperand` if `-` is applied to a non-number.
/// - `InvalidCast` if `!` is applied to a value with no boolean reading.
pub fn eval_unary(op: UnaryOperator, operand: &Expr) -> EvalResult<Expr> {
    match op {
        UnaryOperator::Negate => match operand {
            Expr::Integer(n) => Ok(Expr::Integer(n.wrapping_neg())),
            Expr::Decimal(d) => Ok(Expr::Decimal(-*d)),
            _ => Err(RuntimeError::InvalidOperand { operator: op.symbol(),
                                                    operand:  operand.explain(), }),
        },
        UnaryOperator::Not => Ok(Expr::Bool(!operand.as_bool()?)),
    }
}
