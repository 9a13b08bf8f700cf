/// The core `Value` enum and its accessors.
///
/// Declares every runtime value variant, the coercions builtins rely on,
/// display formatting, and the structural conversions to and from AST
/// elements used by `quote` and `eval`.
pub mod core;
/// Function objects.
///
/// Defines the immutable triple a function value bundles: parameter names,
/// an unevaluated body element, and the environment captured at the
/// definition site.
pub mod function;
