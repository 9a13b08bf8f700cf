//! # lisq
//!
//! lisq is an interpreter for a small, fully parenthesized expression
//! language with symbolic atoms, numeric/boolean/null literals, lists,
//! closures and non-local control flow. Source text runs through four
//! stages: lexical scanning, a recovering recursive-descent parser, a
//! scope-aware semantic analyzer, and a tree-walking evaluator — plus an
//! optional constant-folding / dead-store optimizer that rewrites the AST
//! without changing its meaning.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Node,
    error::{ParseError, SemanticError},
    interpreter::{
        analyzer::core::analyze,
        evaluator::core::Interpreter,
        lexer::tokenize,
        optimizer::optimize,
        parser::Parser,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Element` and `Node` types that represent the
/// syntactic structure of source code as a tree. The same representation is
/// shared by the parser that builds it, the optimizer that rewrites it, and
/// the analyzer and evaluator that both consume it independently.
///
/// # Responsibilities
/// - Defines the recursive element type for atoms, literals and lists.
/// - Pairs top-level forms with source lines for error reporting.
/// - Renders elements back to re-readable source text.
pub mod ast;
/// Provides unified error types for parsing, analysis and evaluation.
///
/// This module defines all errors that can be raised by the pipeline
/// stages. It standardizes error reporting and carries line numbers and
/// detailed messages for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, analyzer,
///   evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, semantic analysis, AST
/// optimization, evaluation, value representations and error handling to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, optimizer,
///   evaluator, and value types.
/// - Provides entry points for each stage of the pipeline.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides the conversion helpers and the shared integer/real
/// promotion predicate used by both the optimizer and the evaluator.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Define the exact-integer rule behind arithmetic promotion.
pub mod util;

/// Options controlling how a source program is run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Accept unknown lexemes as plain atoms instead of rejecting them.
    pub lenient: bool,
    /// Run the constant-folding / dead-store pass before evaluating.
    pub fold:    bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { lenient: false,
               fold:    true, }
    }
}

/// Runs a source program through the whole pipeline and returns one value
/// per top-level form.
///
/// The stages run in order: tokenize, parse, analyze, optionally optimize,
/// interpret. This entry point gates on diagnostics — the first parse or
/// semantic diagnostic is returned as the error instead of evaluating.
/// Callers that want different gating can drive the stage entry points
/// directly.
///
/// # Errors
/// Returns the first parse diagnostic, the first semantic diagnostic, or
/// the runtime error that aborted evaluation.
///
/// # Examples
/// ```
/// use lisq::{RunOptions, run_source};
/// use lisq::interpreter::value::core::Value;
///
/// let values = run_source("(plus 1 2)", &RunOptions::default()).unwrap();
/// assert_eq!(values.last(), Some(&Value::Integer(3)));
///
/// // Referencing an atom that was never bound fails.
/// assert!(run_source("(plus x 1)", &RunOptions::default()).is_err());
/// ```
pub fn run_source(source: &str,
                  options: &RunOptions)
                  -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    let tokens = tokenize(source);
    let parser = if options.lenient {
        Parser::lenient(&tokens)
    } else {
        Parser::new(&tokens)
    };

    let (nodes, diagnostics) = parser.parse_program();
    if let Some(first) = diagnostics.into_iter().next() {
        return Err(Box::new(first));
    }
    if let Some(first) = analyze(&nodes).into_iter().next() {
        return Err(Box::new(first));
    }

    let nodes = if options.fold { optimize(&nodes) } else { nodes };

    let mut interpreter = Interpreter::new();
    Ok(interpreter.interpret(&nodes)?)
}

/// Parses and analyzes a program without evaluating it.
///
/// Returns the recovered nodes together with every parse diagnostic and
/// every semantic diagnostic, in source order. Useful for tooling and for
/// the driver's check-only mode.
///
/// # Examples
/// ```
/// use lisq::check_source;
///
/// let (nodes, parse_diags, semantic_diags) = check_source("(break)", false);
/// assert_eq!(nodes.len(), 1);
/// assert!(parse_diags.is_empty());
/// assert_eq!(semantic_diags.len(), 1);
/// ```
#[must_use]
pub fn check_source(source: &str,
                    lenient: bool)
                    -> (Vec<Node>, Vec<ParseError>, Vec<SemanticError>) {
    let tokens = tokenize(source);
    let parser = if lenient {
        Parser::lenient(&tokens)
    } else {
        Parser::new(&tokens)
    };

    let (nodes, parse_diagnostics) = parser.parse_program();
    let semantic_diagnostics = analyze(&nodes);
    (nodes, parse_diagnostics, semantic_diagnostics)
}
