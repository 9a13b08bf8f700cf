/// Builtin signatures.
///
/// Declares the arity, argument classes and return types of every builtin
/// keyword, as a static table the checks and the type inference both read.
pub mod builtins;
/// The analysis pass itself.
///
/// Walks the program, maintains the scope chain, and collects every
/// diagnostic it can find without stopping.
pub mod core;
/// Scope frames for analysis.
///
/// An arena of symbol-table frames addressed by index; the parent link is
/// just another index, which sidesteps ownership cycles entirely.
pub mod scope;
/// Lightweight type inference.
///
/// A best-effort, depth-bounded static approximation over the type tags
/// `number`, `bool`, `null`, `list` and `any`. Advisory only — inference
/// never changes what the interpreter does.
pub mod types;
