/// Numeric helpers shared across stages.
///
/// This module holds the safe-conversion routines and the exactness
/// predicate behind the language's integer/real promotion rule. Both the
/// optimizer (when folding constants) and the evaluator (when computing
/// builtin arithmetic) go through these functions, which is what guarantees
/// the two agree bit for bit.
pub mod num;
