use crate::interpreter::{analyzer::types::InferredType, lexer::Keyword};

/// The class of values a builtin accepts at one argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// An integer or real.
    Number,
    /// A boolean.
    Bool,
    /// A number, or a boolean coerced to `1.0`/`0.0`.
    NumberOrBool,
    /// A list.
    List,
    /// Anything.
    Any,
}

impl ArgType {
    /// A readable name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Bool => "a boolean",
            Self::NumberOrBool => "a number or boolean",
            Self::List => "a list",
            Self::Any => "any value",
        }
    }

    /// Tests whether an inferred type satisfies this argument class.
    ///
    /// `any` on either side always passes — inference is conservative and
    /// only flags clear mismatches.
    #[must_use]
    pub const fn admits(self, inferred: InferredType) -> bool {
        matches!((self, inferred),
                 (Self::Any, _)
                 | (_, InferredType::Any)
                 | (Self::Number, InferredType::Number)
                 | (Self::Bool, InferredType::Bool)
                 | (Self::NumberOrBool, InferredType::Number | InferredType::Bool)
                 | (Self::List, InferredType::List))
    }
}

/// Declared signature of one builtin: fixed argument classes and a return
/// type.
#[derive(Debug)]
pub struct BuiltinSpec {
    /// The builtin keyword.
    pub keyword: Keyword,
    /// One class per argument position; the length is the arity.
    pub args:    &'static [ArgType],
    /// The type the builtin's result infers to.
    pub returns: InferredType,
}

impl BuiltinSpec {
    /// The fixed number of arguments the builtin takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.args.len()
    }
}

/// Defines the builtin signature table.
///
/// Each entry names a keyword, its argument classes and its return type;
/// the macro produces the static `SPECS` table the lookup below reads.
macro_rules! builtin_specs {
    (
        $(
            $keyword:ident => {
                args: $args:expr,
                returns: $returns:ident $(,)?
            }
        ),* $(,)?
    ) => {
        static SPECS: &[BuiltinSpec] = &[
            $(
                BuiltinSpec { keyword: Keyword::$keyword,
                              args:    $args,
                              returns: InferredType::$returns, },
            )*
        ];
    };
}

builtin_specs! {
    Plus      => { args: &[ArgType::Number, ArgType::Number], returns: Number },
    Minus     => { args: &[ArgType::Number, ArgType::Number], returns: Number },
    Times     => { args: &[ArgType::Number, ArgType::Number], returns: Number },
    Divide    => { args: &[ArgType::Number, ArgType::Number], returns: Number },
    Less      => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    Lesseq    => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    Greater   => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    Greatereq => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    Equal     => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    Nonequal  => { args: &[ArgType::NumberOrBool, ArgType::NumberOrBool], returns: Bool },
    And       => { args: &[ArgType::Bool, ArgType::Bool], returns: Bool },
    Or        => { args: &[ArgType::Bool, ArgType::Bool], returns: Bool },
    Xor       => { args: &[ArgType::Bool, ArgType::Bool], returns: Bool },
    Not       => { args: &[ArgType::Bool], returns: Bool },
    Isint     => { args: &[ArgType::Any], returns: Bool },
    Isreal    => { args: &[ArgType::Any], returns: Bool },
    Isbool    => { args: &[ArgType::Any], returns: Bool },
    Isnull    => { args: &[ArgType::Any], returns: Bool },
    Isatom    => { args: &[ArgType::Any], returns: Bool },
    Islist    => { args: &[ArgType::Any], returns: Bool },
    Head      => { args: &[ArgType::List], returns: Any },
    Tail      => { args: &[ArgType::List], returns: List },
    Cons      => { args: &[ArgType::Any, ArgType::List], returns: List },
    Eval      => { args: &[ArgType::Any], returns: Any },
}

/// Looks up the signature of a builtin keyword.
///
/// Returns `None` for the special forms, which have no fixed signature.
///
/// ## Example
/// ```
/// use lisq::interpreter::{analyzer::builtins::builtin_spec, lexer::Keyword};
///
/// assert_eq!(builtin_spec(Keyword::Plus).map(|spec| spec.arity()), Some(2));
/// assert!(builtin_spec(Keyword::Setq).is_none());
/// ```
#[must_use]
pub fn builtin_spec(keyword: Keyword) -> Option<&'static BuiltinSpec> {
    SPECS.iter().find(|spec| spec.keyword == keyword)
}
