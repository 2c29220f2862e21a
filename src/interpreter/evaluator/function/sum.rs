use rust_decimal::Decimal;

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
    util::num::usize_to_i64_saturating,
};

/// Adds up the elements of a list.
///
/// The total is always a decimal, so `sum [1, 2, 3]` is `6.0`.
///
/// # Parameters
/// - `args`: Slice containing `[list]`.
///
/// # Returns
/// `Expr::Decimal` holding the total; `0.0` for an empty list.
///
/// # Errors
/// - `InfiniteList` if the list is infinite.
/// - `InvalidCast` if an element is not a number.
/// - `Overflow` if the total leaves the decimal range.
///
/// # Example
/// ```
/// use morgana::{get_result, EvalOptions};
///
/// assert_eq!(get_result("sum [1, 2, 3]", &EvalOptions::default()).unwrap(), "6.0");
/// assert!(get_result("sum [1..]", &EvalOptions::default()).is_err());
/// ```
pub fn sum(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [list] = check_arity::<1>("sum", args)?;
    let list = finite_list("sum", list)?;

    let mut total = Decimal::ZERO;
    for item in ListIter::new(context, list) {
        let value = item?.as_number()?.to_decimal();
        total = total.checked_add(value)
                     .ok_or(RuntimeError::Overflow { operator: "sum" })?;
    }
    Ok(Expr::Decimal(total))
}

/// Counts the elements of a list.
///
/// Every element is forced, so errors raised by a lazy view surface here.
///
/// # Parameters
/// - `args`: Slice containing `[list]`.
///
/// # Errors
/// `InfiniteList` if the list is infinite.
pub fn length(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [list] = check_arity::<1>("length", args)?;
    let list = finite_list("length", list)?;

    let mut count = 0_usize;
    for item in ListIter::new(context, list) {
        item?;
        count += 1;
    }
    Ok(Expr::Integer(usize_to_i64_saturating(count)))
}

/// Casts `value` to a list and rejects infinite ones.
pub(in crate::interpreter::evaluator::function) fn finite_list<'a>(function: &'static str,
                                                                   value: &'a Expr)
                                                                   -> EvalResult<&'a List> {
    let list = value.as_list()?;
    if list.is_infinite() {
        return Err(RuntimeError::InfiniteList { function });
    }
    Ok(list)
}
