/// Value conversions and diagnostics.
///
/// Casts from an evaluated expression to the Rust type an operation needs,
/// and the "explain" rendering used in error messages.
pub mod convert;
/// Traversal of lists.
///
/// Defines the `Cursor` trait each list variant implements and the
/// cancellation-aware `ListIter` adapter.
pub mod cursor;
/// Activation records for lambda invocations.
pub mod frame;
/// Lazy list values.
///
/// Materialised lists, arithmetic ranges, and the prepend, concat, map,
/// filter and drop views built over them.
pub mod list;
/// Numeric promotion between integers and decimals.
pub mod number;
