/// Builtin operations over evaluated values.
///
/// Implements arithmetic, comparison, logical, type-predicate and list
/// builtins. Every builtin receives fully evaluated arguments; `eval` is
/// the one exception and lives in the core evaluator because it needs the
/// current environment.
pub mod builtins;
/// The core evaluation loop.
///
/// Defines the `Interpreter`, the `Flow` control-signal type, special-form
/// handlers and function application.
pub mod core;
/// Runtime environments.
///
/// Defines the mutable name-to-value frames chained through shared parent
/// links; closures keep their defining frame alive by holding the same
/// reference-counted handle.
pub mod env;
