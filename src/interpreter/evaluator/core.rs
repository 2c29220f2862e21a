use std::{cell::Cell, rc::Rc};

use log::debug;

use crate::{
    ast::{Expr, Fragment},
    error::RuntimeError,
    interpreter::{
        evaluator::{cancel::CancellationToken, unary::eval_unary},
        value::{
            cursor::ListIter,
            frame::Frame,
            list::{List, Range},
            number::Number,
        },
    },
};

/// Maximum nesting of [`Context::eval`] calls before evaluation fails with
/// `RuntimeError::RecursionLimit`.
pub const MAX_DEPTH: usize = 128;

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// A context carries the cancellation token of one evaluation request and
/// the current nesting depth. Names are resolved by the parser and lambda
/// arguments travel in [`Frame`]s, so one context can evaluate any number of
/// expressions.
///
/// ## Usage
///
/// Create a context per request, arrange for its token to be cancelled if
/// the request must be time-boxed, and pass it to [`Context::eval`] or
/// [`Expr::evaluate`].
#[derive(Debug, Default)]
pub struct Context {
    token: CancellationToken,
    depth: Cell<usize>,
}

impl Context {
    /// Creates a context with a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context observing an existing token.
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self { token,
               depth: Cell::new(0) }
    }

    /// The token this context observes.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Fails with `RuntimeError::Cancelled` once the token is cancelled.
    ///
    /// Called before every evaluation step and every list element.
    ///
    /// # Errors
    /// `Cancelled` if cancellation was requested.
    pub fn check(&self) -> EvalResult<()> {
        if self.token.is_cancelled() {
            debug!("evaluation cancelled");
            return Err(RuntimeError::Cancelled);
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Values such as
    /// literals, lists, functions and closures evaluate to themselves. A
    /// lambda evaluates to a closure over `env`, and a list literal evaluated
    /// inside a lambda call keeps `env` so its elements can still read the
    /// call's arguments when they are forced. Every evaluation of a list
    /// literal starts with none of its elements forced.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Activation records of the lambdas being evaluated, if any.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Errors
    /// - `Cancelled` once the token is cancelled.
    /// - `RecursionLimit` if evaluations nest more than [`MAX_DEPTH`] deep.
    /// - Any error raised by the expression itself.
    pub fn eval(&self, expr: &Expr, env: Option<&Rc<Frame>>) -> EvalResult<Expr> {
        self.check()?;

        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            debug!("evaluation exceeded {MAX_DEPTH} nested levels");
            return Err(RuntimeError::RecursionLimit { limit: MAX_DEPTH });
        }
        self.depth.set(depth + 1);
        let result = self.eval_inner(expr, env);
        self.depth.set(depth);
        result
    }

    fn eval_inner(&self, expr: &Expr, env: Option<&Rc<Frame>>) -> EvalResult<Expr> {
        match expr {
            Expr::Function(function) if function.arity == 0 => (function.implementation)(self, &[]),
            Expr::Integer(_)
            | Expr::Decimal(_)
            | Expr::Bool(_)
            | Expr::Str(_)
            | Expr::Null
            | Expr::Function(_)
            | Expr::Closure { .. }
            | Expr::Partial { .. } => Ok(expr.clone()),
            Expr::List(List::Items { items, env: captured, .. }) => {
                let env = captured.clone().or_else(|| env.cloned());
                Ok(Expr::List(List::literal(Rc::clone(items), env)))
            },
            Expr::List(_) => Ok(expr.clone()),
            Expr::Range { start, second, end } => {
                self.eval_range(start, second.as_deref(), end.as_deref(), env)
            },
            Expr::Call { function, argument } => {
                let function = self.eval(function, env)?;
                let argument = self.eval(argument, env)?;
                self.apply(&function, argument)
            },
            Expr::Lambda(lambda) => Ok(Expr::Closure { lambda: Rc::clone(lambda),
                                                       env:    env.cloned(), }),
            Expr::Argument(slot) => {
                env.and_then(|frame| frame.lookup(slot))
                   .cloned()
                   .ok_or_else(|| RuntimeError::UnboundArgument { name: slot.name.clone() })
            },
            Expr::Unary { op, operand } => {
                let operand = self.eval(operand, env)?;
                eval_unary(*op, &operand)
            },
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right, env),
            Expr::LeftSection { op, left } => Ok(Expr::LeftSection { op:   *op,
                                                                     left: Rc::new(self.eval(left, env)?), }),
            Expr::RightSection { op, right } => {
                Ok(Expr::RightSection { op:    *op,
                                        right: Rc::new(self.eval(right, env)?), })
            },
            Expr::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.eval(condition, env)?.as_bool()? {
                    self.eval(then_branch, env)
                } else {
                    self.eval(else_branch, env)
                }
            },
            Expr::ParsedString(fragments) => {
                let mut text = String::new();
                for fragment in fragments.iter() {
                    match fragment {
                        Fragment::Text(literal) => text.push_str(literal),
                        Fragment::Expr(expr) => {
                            let value = self.eval(expr, env)?;
                            text.push_str(&self.display_string(&value)?);
                        },
                    }
                }
                Ok(Expr::string(&text))
            },
        }
    }

    /// Evaluates the bounds of a range literal into a range.
    ///
    /// The step is the difference between the second and the first element,
    /// or 1 when only the first is given.
    fn eval_range(&self,
                  start: &Expr,
                  second: Option<&Expr>,
                  end: Option<&Expr>,
                  env: Option<&Rc<Frame>>)
                  -> EvalResult<Expr> {
        let start = self.eval(start, env)?.as_number()?;
        let step = match second {
            Some(second) => {
                let second = self.eval(second, env)?.as_number()?;
                second.checked_sub(start)
                      .ok_or(RuntimeError::Overflow { operator: ".." })?
            },
            None => Number::Integer(1),
        };
        let end = match end {
            Some(end) => Some(self.eval(end, env)?.as_number()?),
            None => None,
        };

        Ok(Expr::List(List::Range(Range::new(start, step, end))))
    }

    /// Replaces every finite list in a value by the list of its elements.
    ///
    /// Lazy views over finite lists are traversed and their elements
    /// materialized in turn. Infinite lists and all other values are returned
    /// unchanged.
    ///
    /// # Errors
    /// Propagates errors raised while forcing elements, including
    /// cancellation.
    pub fn materialize(&self, value: &Expr) -> EvalResult<Expr> {
        match value {
            Expr::List(list) if !list.is_infinite() => {
                let items = ListIter::new(self, list).map(|item| item.and_then(|item| self.materialize(&item)))
                                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Expr::list(items))
            },
            _ => Ok(value.clone()),
        }
    }

    /// Renders a value as source text, with finite lists materialized.
    ///
    /// # Errors
    /// See [`Context::materialize`].
    pub fn render(&self, value: &Expr) -> EvalResult<String> {
        Ok(self.materialize(value)?.to_string())
    }

    /// Renders a value for splicing into text.
    ///
    /// Strings are inserted without quotes and null as nothing; every other
    /// value is rendered as by [`Context::render`].
    ///
    /// # Errors
    /// See [`Context::materialize`].
    pub fn display_string(&self, value: &Expr) -> EvalResult<String> {
        match value {
            Expr::Str(s) => Ok(s.to_string()),
            Expr::Null => Ok(String::new()),
            _ => self.render(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn eval(source: &str) -> EvalResult<Expr> {
        let expr = parse(source).expect("source parses");
        Context::new().eval(&expr, None)
    }

    #[test]
    fn lambdas_evaluate_to_closures() {
        assert!(matches!(eval(r"\x -> x"), Ok(Expr::Closure { .. })));
    }

    #[test]
    fn cancelled_context_refuses_to_start() {
        let context = Context::new();
        context.token().cancel();
        assert_eq!(context.eval(&Expr::Integer(1), None).unwrap_err(),
                   RuntimeError::Cancelled);
    }

    #[test]
    fn display_string_unquotes() {
        let context = Context::new();
        assert_eq!(context.display_string(&Expr::string("a")).unwrap(), "a");
        assert_eq!(context.display_string(&Expr::Null).unwrap(), "");
        assert_eq!(context.display_string(&eval("[1, \"b\"]").unwrap()).unwrap(),
                   "[1, \"b\"]");
    }

    #[test]
    fn ranges_take_their_step_from_the_second_element() {
        let context = Context::new();
        let range = eval("[10, 7..0]").unwrap();
        assert_eq!(context.render(&range).unwrap(), "[10, 7, 4, 1]");
    }
}
