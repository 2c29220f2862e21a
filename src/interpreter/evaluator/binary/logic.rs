use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::evaluator::core::EvalResult,
};

/// Evaluates `&&` or `||` on two evaluated operands, both cast to boolean.
///
/// Short-circuiting happens earlier, in
/// [`Context::eval_binary`](crate::interpreter::evaluator::core::Context::eval_binary);
/// this is reached when a section such as `(true &&)` is applied.
///
/// # Errors
/// `InvalidCast` if an operand has no boolean reading.
pub fn eval_logic(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Expr> {
    let left = left.as_bool()?;
    let right = right.as_bool()?;
    Ok(Expr::Bool(if op == BinaryOperator::Or { left || right } else { left && right }))
}
