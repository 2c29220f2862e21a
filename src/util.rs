/// Numeric conversion helpers.
///
/// Lossless conversions between the language's decimals and the integer types
/// the evaluator needs for counts and indices. Every fallible conversion
/// returns a `Result` carrying a caller-chosen error.
pub mod num;
/// Text helpers.
///
/// Escaping of string literals for rendering, decimal formatting, and the
/// lenient boolean parser shared by the evaluator and embedding applications.
pub mod text;
