/// Numeric conversion helpers.
///
/// This module provides safe functions for converting integers to
/// floating-point values without risking silent data loss or rounding errors.
/// Integer operands are promoted through these helpers whenever they meet a
/// float in arithmetic or comparisons.
pub mod num;
/// Native stack growth for deeply recursive evaluation.
pub mod stack;
