#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be recorded while parsing.
pub enum ParseError {
    /// Found a token that cannot begin or continue an element here.
    UnexpectedToken {
        /// A description of the offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The lexer produced an unrecognized lexeme and lenient mode is off.
    UnrecognizedLexeme {
        /// The raw text of the lexeme.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` appeared with no list open.
    UnmatchedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The input ended while at least one list was still open.
    MissingClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The input ended in the middle of an element, e.g. after a quote mark.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Gets the source line the diagnostic refers to.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnrecognizedLexeme { line, .. }
            | Self::UnmatchedClosingParen { line }
            | Self::MissingClosingParen { line }
            | Self::UnexpectedEndOfInput { line } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnrecognizedLexeme { text, line } => {
                write!(f, "Error on line {line}: Unrecognized lexeme '{text}'.")
            },

            Self::UnmatchedClosingParen { line } => {
                write!(f, "Error on line {line}: Unmatched closing parenthesis ')'.")
            },

            Self::MissingClosingParen { line } => write!(f,
                                                         "Error on line {line}: Missing closing parenthesis ')' at end of input."),

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
