use crate::{ast::Expr, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Checks that a native function received exactly `N` arguments.
///
/// Application guarantees this for functions registered with arity `N`; the
/// check keeps a built-in sound when it is registered again under a
/// different arity.
///
/// # Parameters
/// - `function`: Name used in the error message.
/// - `arguments`: The arguments received.
///
/// # Returns
/// The arguments as a fixed-size array reference, ready to destructure.
///
/// # Errors
/// `ArityMismatch` if the count differs.
///
/// # Example
/// ```
/// use morgana::{ast::Expr, interpreter::evaluator::utils::check_arity};
///
/// let arguments = [Expr::Integer(1), Expr::Null];
/// let [first, _] = check_arity::<2>("pair", &arguments).unwrap();
/// assert_eq!(first.to_string(), "1");
/// assert!(check_arity::<1>("single", &arguments).is_err());
/// ```
pub fn check_arity<'a, const N: usize>(function: &str, arguments: &'a [Expr]) -> EvalResult<&'a [Expr; N]> {
    arguments.try_into()
             .map_err(|_| RuntimeError::ArityMismatch { function: function.to_string(),
                                                        expected: N,
                                                        found:    arguments.len(), })
}
