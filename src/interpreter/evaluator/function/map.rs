use std::rc::Rc;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::check_arity,
        },
        value::list::List,
    },
};

/// Applies a function to every element of a list, lazily.
///
/// The result is a view: nothing is applied until an element is produced, so
/// mapping an infinite list is fine and the result is infinite as well.
///
/// # Parameters
/// - `args`: Slice containing `[function, list]`.
///
/// # Returns
/// The mapped list.
///
/// # Example
/// ```
/// use morgana::{get_result, EvalOptions};
///
/// let result = get_result("map (+ 1) [1, 2, 3]", &EvalOptions::default()).unwrap();
/// assert_eq!(result, "[2, 3, 4]");
/// ```
pub fn map(_context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [function, list] = check_arity::<2>("map", args)?;
    Ok(Expr::List(List::Mapped { function: Rc::new(function.clone()),
                                 source:   Rc::new(list.as_list()?.clone()), }))
}

/// Keeps the elements of a list for which a predicate holds, lazily.
///
/// The predicate's result is cast to boolean. Filtering an infinite list
/// gives an infinite list, even if no element ever passes.
///
/// # Parameters
/// - `args`: Slice containing `[predicate, list]`.
///
/// # Returns
/// The filtered list.
pub fn filter(_context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [predicate, list] = check_arity::<2>("filter", args)?;
    Ok(Expr::List(List::Filtered { predicate: Rc::new(predicate.clone()),
                                   source:    Rc::new(list.as_list()?.clone()), }))
}
