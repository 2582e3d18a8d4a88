/// The runtime value domain.
///
/// Defines the `Value` enum with its four kinds (integers, floating-point
/// numbers, strings and booleans), the conversions the evaluator relies on and
/// the textual form used by `print`.
pub mod core;
