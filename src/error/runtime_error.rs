#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can abort an evaluation.
///
/// Nested elements carry no source positions, so every runtime error cites
/// the line of the top-level form that was being evaluated when it occurred.
pub enum RuntimeError {
    /// Tried to read an atom that is bound in no enclosing environment.
    UndefinedAtom {
        /// The name of the atom.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is neither a builtin nor bound to a function.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The head of a call evaluated to a non-function value.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a call.
    ArgumentCountMismatch {
        /// The callee name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A list value was expected, but not found.
    ExpectedList {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `head` was applied to an empty list.
    HeadOfEmptyList {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The divisor of a `divide` evaluated to zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer was too large to take part in real arithmetic exactly.
    IntegerTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `break` signal escaped without any enclosing `while`.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` signal escaped without any enclosing `prog` or function.
    ReturnOutsideBlock {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A special form was applied to the wrong shape of arguments.
    MalformedForm {
        /// The special form involved.
        form:    &'static str,
        /// What was wrong with it.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedAtom { name, line } => {
                write!(f, "Error on line {line}: Undefined atom '{name}'.")
            },
            Self::UndefinedFunction { name, line } => {
                write!(f, "Error on line {line}: Undefined function '{name}'.")
            },
            Self::NotCallable { line } => {
                write!(f, "Error on line {line}: Head of the call is not a function.")
            },
            Self::ArgumentCountMismatch { name, line } => write!(f,
                                                                 "Error on line {line}: Wrong number of arguments in call to '{name}'."),

            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::ExpectedBoolean { line } => write!(f, "Error on line {line}: Expected boolean."),
            Self::ExpectedList { line } => write!(f, "Error on line {line}: Expected list."),
            Self::HeadOfEmptyList { line } => {
                write!(f, "Error on line {line}: 'head' applied to an empty list.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::IntegerTooLarge { line } => write!(f,
                                                     "Error on line {line}: Integer is too large for exact arithmetic."),

            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'break' outside any 'while' loop.")
            },
            Self::ReturnOutsideBlock { line } => write!(f,
                                                        "Error on line {line}: 'return' outside any 'prog' block or function body."),

            Self::MalformedForm { form, details, line } => {
                write!(f, "Error on line {line}: Malformed '{form}' form: {details}.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
