/// Syntax errors.
///
/// Defines the error types recorded while parsing token streams. The parser
/// never aborts on these; it collects them alongside the nodes it managed to
/// recover so callers can decide whether to continue.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the error types raised during evaluation: unresolved atoms, type
/// mismatches in builtins, wrong argument counts, misplaced control forms and
/// division by zero. Runtime errors are fatal to the evaluation in progress.
pub mod runtime_error;
/// Semantic diagnostics.
///
/// Holds the advisory diagnostics produced by the semantic analyzer. They are
/// collected, never fatal, and never block interpretation by themselves.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
