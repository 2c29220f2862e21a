use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::list::List},
};

/// Evaluates `++` and `:`.
///
/// Neither operand is traversed: the result is a view sharing the original
/// lists, so both work on infinite lists.
///
/// - `a ++ b` requires two lists.
/// - `x : b` requires a list on the right and accepts any value on the left.
///
/// # Errors
/// `TypeMismatch` if a list operand is not a list.
pub fn eval_list_operation(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Expr> {
    let list = match (op, left, right) {
        (BinaryOperator::Concat, Expr::List(first), Expr::List(second)) => {
            List::Concat { first:  Rc::new(first.clone()),
                           second: Rc::new(second.clone()), }
        },
        (BinaryOperator::Prepend, head, Expr::List(tail)) => List::Prepend { head: Rc::new(head.clone()),
                                                                             tail: Rc::new(tail.clone()), },
        _ => {
            return Err(RuntimeError::TypeMismatch { operator: op.symbol(),
                                                    left:     left.explain(),
                                                    right:    right.explain(), });
        },
    };
    Ok(Expr::List(list))
}
