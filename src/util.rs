/// Arbitrary precision numeric helpers.
///
/// This module holds the numeric rules shared by the analyzer and the
/// evaluator: the representable range of literals and exact decimal division
/// with half-to-even rounding.
pub mod num;
