/// The built-in function table and its registration into a scope.
pub mod core;
/// `map` and `filter`.
///
/// Both build lazy views; the function or predicate runs only when an
/// element is produced.
pub mod map;
/// `sum` and `length`.
///
/// Eager folds that refuse infinite lists.
pub mod sum;
/// `take`, `drop`, `head` and `tail`.
pub mod take;
/// The `join` function implementation.
///
/// Concatenates the display strings of a list's elements with a separator.
pub mod join;
