/// The analyzer module performs scope-aware semantic checks.
///
/// The semantic analyzer walks the parsed program with a chain of symbol
/// table frames, infers lightweight types for expressions, and verifies the
/// structure of every special form, call arity, and builtin argument types.
/// Its findings are advisory: it reports every issue it can detect and never
/// blocks the AST from being interpreted by itself.
///
/// # Responsibilities
/// - Maintains scope frames for `prog` blocks and function bodies.
/// - Checks special-form shapes, call arity, and builtin argument types.
/// - Collects all diagnostics instead of stopping at the first.
pub mod analyzer;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the shared AST depth first, left to right, resolving
/// atoms through a chain of environments, dispatching special forms and
/// builtins, and propagating the `return`/`break` control signals to the
/// boundaries that intercept them. It is the core execution engine.
///
/// # Responsibilities
/// - Evaluates elements strictly, in source order.
/// - Manages environment frames and closure capture.
/// - Reports runtime errors such as type mismatches or undefined atoms.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text in a single pass and produces a
/// stream of tokens: literals, keywords, identifiers, parentheses, quote
/// marks, and explicit newline markers. It raises no errors of its own;
/// malformed atoms surface as unknown tokens for the parser to judge.
///
/// # Responsibilities
/// - Converts the input character stream into classified tokens.
/// - Prefers integer classification over real for whole-number literals.
/// - Emits newline tokens so the parser can reconstruct line numbers.
pub mod lexer;
/// The optimizer module rewrites the AST without changing its meaning.
///
/// The optimizer is a pure AST-to-AST transformation: it folds constant
/// subexpressions bottom-up and rewrites top-level assignments whose target
/// is never read. Both passes are required to preserve evaluation semantics
/// exactly, including side-effect ordering.
///
/// # Responsibilities
/// - Folds numeric arithmetic/comparisons and boolean logic over literals.
/// - Leaves quoted structure and literal zero divisors untouched.
/// - Rewrites dead top-level `setq` forms to their value expressions.
pub mod optimizer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser is a recovering recursive-descent pass over the token stream.
/// It produces a line-annotated node per top-level form, desugars quote
/// marks, and on a syntax error records a diagnostic and synchronizes to the
/// next statement so the remaining forms still parse.
///
/// # Responsibilities
/// - Converts tokens into `Element` trees paired with source lines.
/// - Accumulates diagnostics instead of aborting on the first error.
/// - Optionally folds unknown lexemes into atoms (lenient mode).
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the `Value` enum produced by evaluation — numbers,
/// booleans, null, atoms, lists, and function objects — together with the
/// conversions between values and AST elements that `quote` and `eval`
/// rely on.
///
/// # Responsibilities
/// - Defines the `Value` enum and the function-object triple.
/// - Implements accessors, coercions, and display formatting.
/// - Converts structurally between values and elements.
pub mod value;
