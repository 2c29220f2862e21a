use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::{
            binary::{comparison::eval_comparison, list::eval_list_operation, logic::eval_logic, scalar::eval_arithmetic},
            core::{Context, EvalResult},
        },
        value::frame::Frame,
    },
};

impl Context {
    /// Evaluates a binary operation node.
    ///
    /// `&&` and `||` evaluate their right operand only when the left one
    /// does not already decide the result. Every other operator evaluates
    /// both operands, left first.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Unevaluated left operand.
    /// - `right`: Unevaluated right operand.
    /// - `env`: Activation records in effect.
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &Expr,
                       right: &Expr,
                       env: Option<&Rc<Frame>>)
                       -> EvalResult<Expr> {
        if let BinaryOperator::And | BinaryOperator::Or = op {
            let decided = op == BinaryOperator::Or;
            if self.eval(left, env)?.as_bool()? == decided {
                return Ok(Expr::Bool(decided));
            }
            return Ok(Expr::Bool(self.eval(right, env)?.as_bool()?));
        }

        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        eval_binary_values(op, &left, &right)
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// Used for binary nodes once their operands are known and for completing
/// operator sections such as `(+ 1)`.
///
/// # Errors
/// Whatever the operator's family reports, typically `TypeMismatch`.
pub fn eval_binary_values(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Expr> {
    match op {
        BinaryOperator::Or | BinaryOperator::And => eval_logic(op, left, right),
        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => eval_comparison(op, left, right),
        BinaryOperator::Concat | BinaryOperator::Prepend => eval_list_operation(op, left, right),
        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::Mod => eval_arithmetic(op, left, right),
    }
}
