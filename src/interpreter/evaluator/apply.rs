use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::eval_binary_values, core::{Context, EvalResult}},
        value::frame::Frame,
    },
};

impl Context {
    /// Applies a function value to one evaluated argument.
    ///
    /// Native functions, closures and partial applications collect arguments
    /// until their arity is met and are then invoked; before that the result
    /// is a `Partial` value holding the arguments so far. An operator
    /// section is completed by the argument it is missing.
    ///
    /// # Parameters
    /// - `function`: The evaluated callee.
    /// - `argument`: The evaluated argument.
    ///
    /// # Errors
    /// - `NotCallable` if `function` is not a function value.
    /// - Propagates errors raised by the invoked function.
    pub fn apply(&self, function: &Expr, argument: Expr) -> EvalResult<Expr> {
        match function {
            Expr::Function(_) | Expr::Closure { .. } => self.supply(function, &[], argument),
            Expr::Partial { target, arguments } => self.supply(target, arguments, argument),
            Expr::LeftSection { op, left } => eval_binary_values(*op, left, &argument),
            Expr::RightSection { op, right } => eval_binary_values(*op, &argument, right),
            _ => Err(RuntimeError::NotCallable { value: function.explain() }),
        }
    }

    fn supply(&self, target: &Expr, received: &[Expr], argument: Expr) -> EvalResult<Expr> {
        let arity = arity(target).ok_or_else(|| RuntimeError::NotCallable { value: target.explain() })?;

        let mut arguments = Vec::with_capacity(received.len() + 1);
        arguments.extend_from_slice(received);
        arguments.push(argument);

        if arguments.len() < arity {
            return Ok(Expr::Partial { target:    Rc::new(target.clone()),
                                      arguments: arguments.into(), });
        }
        self.invoke(target, arguments)
    }

    fn invoke(&self, target: &Expr, arguments: Vec<Expr>) -> EvalResult<Expr> {
        match target {
            Expr::Function(function) => (function.implementation)(self, &arguments),
            Expr::Closure { lambda, env } => {
                let frame = Frame::new(lambda.depth, arguments, env.clone());
                self.eval(&lambda.body, Some(&frame))
            },
            _ => Err(RuntimeError::NotCallable { value: target.explain() }),
        }
    }
}

/// Number of arguments a function value collects before it is invoked.
fn arity(target: &Expr) -> Option<usize> {
    match target {
        Expr::Function(function) => Some(function.arity),
        Expr::Closure { lambda, .. } => Some(lambda.arity()),
        _ => None,
    }
}
