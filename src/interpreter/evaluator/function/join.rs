use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::sum::finite_list,
            utils::check_arity,
        },
        value::cursor::ListIter,
    },
};

/// Joins the display strings of a list's elements with a separator.
///
/// Strings are inserted without quotes and `null` as the empty string; other
/// values are rendered as source text.
///
/// # Parameters
/// - `args`: Slice containing `[separator, list]`.
///
/// # Returns
/// `Expr::Str` with the joined text; empty for an empty list.
///
/// # Errors
/// - `InvalidCast` if the separator is not a string.
/// - `InfiniteList` if the list is infinite.
///
/// # Example
/// ```
/// use morgana::{get_result, EvalOptions};
///
/// assert_eq!(get_result(r#"join(",", [1, 2, 3])"#, &EvalOptions::default()).unwrap(),
///            r#""1,2,3""#);
/// assert_eq!(get_result(r#"join(",", [])"#, &EvalOptions::default()).unwrap(), r#""""#);
/// ```
pub fn join(context: &Context, args: &[Expr]) -> EvalResult<Expr> {
    let [separator, list] = check_arity::<2>("join", args)?;
    let separator = separator.as_str()?;
    let list = finite_list("join", list)?;

    let parts = ListIter::new(context, list).map(|item| item.and_then(|item| context.display_string(&item)))
                                            .collect::<EvalResult<Vec<_>>>()?;
    Ok(Expr::string(&parts.join(separator)))
}
