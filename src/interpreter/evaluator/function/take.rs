use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::check_arity,
        },
        value::{cursor::ListIter, list::List},
    },
    util::num::count_to_usize,
};

/// Materializes the first `n` elements of a list.
///
/// Only the requested elements are produced, so this is the way to look at
/// an infinite list. A shorter list gives all of its elements; a negative
/// count gives none.
///
/// # Parameters
/// - `args`: Slice containing `[count, list]`.
///
/// # Returns
/// A finite list of at most `n` evaluated elements.
///
/// # Errors
/// `InvalidCast` if the count is not a whole number or the list is not a
/// list.
///
/// # Example
/// ```
/// use morgana::{get_result, EvalOptions};
///
/// let result = get_result("take(5, [1..])", &EvalOptions::default()).unwrap();
/// assert_eq!(result, "[1, 2, 3, 4, 5]");
/// ```
pub fn take(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [count, list] = check_arity::<2>("take", args)?;
    let count = count_to_usize(count.as_integer()?);
    let list = list.as_list()?;

    let items = ListIter::new(context, list).take(count)
                                            .collect::<EvalResult<Vec<_>>>()?;
    Ok(Expr::list(items))
}

/// Skips the first `n` elements of a list, lazily.
///
/// # Parameters
/// - `args`: Slice containing `[count, list]`.
///
/// # Returns
/// A view of the list without its first `n` elements.
pub fn drop(_context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [count, list] = check_arity::<2>("drop", args)?;
    let count = count_to_usize(count.as_integer()?);
    Ok(Expr::List(List::Dropped { count,
                                  source: Rc::new(list.as_list()?.clone()) }))
}

/// Returns the first element of a list.
///
/// # Errors
/// `EmptyResult` if the list is empty.
pub fn head(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [list] = check_arity::<1>("head", args)?;
    ListIter::new(context, list.as_list()?).next()
                                           .unwrap_or(Err(RuntimeError::EmptyResult { function: "head" }))
}

/// Returns every element of a list but the first.
///
/// The first element is produced once to make sure it exists; the rest stay
/// lazy.
///
/// # Errors
/// `EmptyResult` if the list is empty.
pub fn tail(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [list] = check_arity::<1>("tail", args)?;
    let list = list.as_list()?;

    match ListIter::new(context, list).next() {
        Some(first) => {
            first?;
            Ok(Expr::List(List::Dropped { count:  1,
                                          source: Rc::new(list.clone()), }))
        },
        None => Err(RuntimeError::EmptyResult { function: "tail" }),
    }
}
