#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the advisory diagnostics produced by the semantic analyzer.
///
/// Every variant carries the source line of the top-level form it was found
/// in. The analyzer collects these without stopping and without mutating the
/// AST; whether they block evaluation is the caller's policy.
pub enum SemanticError {
    /// A special form had the wrong shape, e.g. a `setq` without a target.
    MalformedForm {
        /// The special form involved.
        form:    &'static str,
        /// What was wrong with it.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An atom was referenced before any binding of it was seen.
    UndeclaredIdentifier {
        /// The name of the identifier.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call head named neither a builtin, a known function, nor a bound
    /// variable.
    UnknownCallee {
        /// The name in head position.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The callee name.
        name:     String,
        /// How many arguments the callee takes.
        expected: usize,
        /// How many arguments were supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A builtin argument inferred to a type the builtin cannot accept.
    ArgumentTypeMismatch {
        /// The builtin name.
        name:     String,
        /// 1-based position of the offending argument.
        argument: usize,
        /// The type class the builtin expects there.
        expected: &'static str,
        /// The inferred type of the argument.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A `cond`/`while` condition inferred to a non-boolean type.
    ConditionNotBoolean {
        /// The form whose condition was checked.
        form:  &'static str,
        /// The inferred type of the condition.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `return` was used outside any `prog` block or function body.
    ReturnOutsideBlock {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break` was used outside any `while` loop.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl SemanticError {
    /// Gets the source line the diagnostic refers to.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::MalformedForm { line, .. }
            | Self::UndeclaredIdentifier { line, .. }
            | Self::UnknownCallee { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::ArgumentTypeMismatch { line, .. }
            | Self::ConditionNotBoolean { line, .. }
            | Self::ReturnOutsideBlock { line }
            | Self::BreakOutsideLoop { line } => *line,
        }
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedForm { form, details, line } => {
                write!(f, "Error on line {line}: Malformed '{form}' form: {details}.")
            },

            Self::UndeclaredIdentifier { name, line } => {
                write!(f, "Error on line {line}: Undeclared identifier '{name}'.")
            },

            Self::UnknownCallee { name, line } => {
                write!(f, "Error on line {line}: Call to undefined function '{name}'.")
            },

            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: '{name}' takes {expected} argument(s), but {found} were supplied."),

            Self::ArgumentTypeMismatch { name,
                                         argument,
                                         expected,
                                         found,
                                         line, } => write!(f,
                                                           "Error on line {line}: Argument {argument} of '{name}' must be {expected}, but is {found}."),

            Self::ConditionNotBoolean { form, found, line } => write!(f,
                                                                      "Error on line {line}: Condition of '{form}' must be boolean, but is {found}."),

            Self::ReturnOutsideBlock { line } => write!(f,
                                                        "Error on line {line}: 'return' used outside any 'prog' block or function body."),

            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'break' used outside any 'while' loop.")
            },
        }
    }
}

impl std::error::Error for SemanticError {}
