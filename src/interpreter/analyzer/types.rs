use crate::{
    ast::Element,
    interpreter::{
        analyzer::{
            builtins,
            scope::{ScopeId, SymbolTable},
        },
        lexer::Keyword,
    },
};

/// The type tags the analyzer reasons with.
///
/// Deliberately unsound and conservative: `Any` passes every check, so
/// inference only ever flags clear mismatches and never blocks execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    /// An integer or real.
    Number,
    /// A boolean.
    Bool,
    /// The null value.
    Null,
    /// A list.
    List,
    /// Unknown or unconstrained.
    Any,
}

impl InferredType {
    /// The tag's display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::List => "list",
            Self::Any => "any",
        }
    }
}

impl std::fmt::Display for InferredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bound on recursive descent during inference, so self-referential forms
/// cannot send it into runaway recursion.
pub const MAX_INFERENCE_DEPTH: usize = 16;

/// Infers the type of an element, best effort.
///
/// Literals map directly; atoms resolve through the scope chain or default
/// to `any`; list forms resolve through the builtin return-type table, the
/// quoted-datum rule, or default to `any` — including unresolved user
/// calls.
///
/// ## Example
/// ```
/// use lisq::{
///     ast::Element,
///     interpreter::analyzer::{
///         scope::SymbolTable,
///         types::{InferredType, infer_type},
///     },
/// };
///
/// let table = SymbolTable::new();
/// let element = Element::Integer(3);
///
/// assert_eq!(infer_type(&element, &table, SymbolTable::ROOT, 0),
///            InferredType::Number);
/// ```
#[must_use]
pub fn infer_type(element: &Element,
                  table: &SymbolTable,
                  scope: ScopeId,
                  depth: usize)
                  -> InferredType {
    if depth > MAX_INFERENCE_DEPTH {
        return InferredType::Any;
    }

    match element {
        Element::Integer(_) | Element::Real(_) => InferredType::Number,
        Element::Bool(_) => InferredType::Bool,
        Element::Null => InferredType::Null,
        Element::Atom(name) => table.lookup_var(scope, name).unwrap_or(InferredType::Any),
        Element::List(items) => infer_list(items, table, scope, depth),
    }
}

fn infer_list(items: &[Element],
              table: &SymbolTable,
              scope: ScopeId,
              depth: usize)
              -> InferredType {
    let Some(keyword) = items.first()
                             .and_then(Element::as_atom)
                             .and_then(Keyword::from_name)
    else {
        return InferredType::Any;
    };

    match keyword {
        Keyword::Quote => items.get(1).map_or(InferredType::Any, |quoted| match quoted {
                                         Element::List(_) => InferredType::List,
                                         Element::Atom(_) => InferredType::Any,
                                         literal => infer_type(literal, table, scope, depth + 1),
                                     }),
        // A setq evaluates to its value.
        Keyword::Setq => items.get(2)
                              .map_or(InferredType::Any,
                                      |value| infer_type(value, table, scope, depth + 1)),
        other => builtins::builtin_spec(other).map_or(InferredType::Any, |spec| spec.returns),
    }
}
