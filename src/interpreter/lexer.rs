use logos::Logos;

/// The fixed, case-sensitive set of keyword atoms.
///
/// Keywords are classified by the lexer but reserved only in list-head
/// position: the parser turns a standalone keyword token back into a plain
/// atom, and the evaluator dispatches on the head atom's keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `quote`
    Quote,
    /// `setq`
    Setq,
    /// `func`
    Func,
    /// `lambda`
    Lambda,
    /// `prog`
    Prog,
    /// `cond`
    Cond,
    /// `while`
    While,
    /// `return`
    Return,
    /// `break`
    Break,
    /// `plus`
    Plus,
    /// `minus`
    Minus,
    /// `times`
    Times,
    /// `divide`
    Divide,
    /// `head`
    Head,
    /// `tail`
    Tail,
    /// `cons`
    Cons,
    /// `equal`
    Equal,
    /// `nonequal`
    Nonequal,
    /// `less`
    Less,
    /// `lesseq`
    Lesseq,
    /// `greater`
    Greater,
    /// `greatereq`
    Greatereq,
    /// `isint`
    Isint,
    /// `isreal`
    Isreal,
    /// `isbool`
    Isbool,
    /// `isnull`
    Isnull,
    /// `isatom`
    Isatom,
    /// `islist`
    Islist,
    /// `and`
    And,
    /// `or`
    Or,
    /// `xor`
    Xor,
    /// `not`
    Not,
    /// `eval`
    Eval,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: &'static [Self] = &[Self::Quote,
                                       Self::Setq,
                                       Self::Func,
                                       Self::Lambda,
                                       Self::Prog,
                                       Self::Cond,
                                       Self::While,
                                       Self::Return,
                                       Self::Break,
                                       Self::Plus,
                                       Self::Minus,
                                       Self::Times,
                                       Self::Divide,
                                       Self::Head,
                                       Self::Tail,
                                       Self::Cons,
                                       Self::Equal,
                                       Self::Nonequal,
                                       Self::Less,
                                       Self::Lesseq,
                                       Self::Greater,
                                       Self::Greatereq,
                                       Self::Isint,
                                       Self::Isreal,
                                       Self::Isbool,
                                       Self::Isnull,
                                       Self::Isatom,
                                       Self::Islist,
                                       Self::And,
                                       Self::Or,
                                       Self::Xor,
                                       Self::Not,
                                       Self::Eval];

    /// The source spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Setq => "setq",
            Self::Func => "func",
            Self::Lambda => "lambda",
            Self::Prog => "prog",
            Self::Cond => "cond",
            Self::While => "while",
            Self::Return => "return",
            Self::Break => "break",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
            Self::Head => "head",
            Self::Tail => "tail",
            Self::Cons => "cons",
            Self::Equal => "equal",
            Self::Nonequal => "nonequal",
            Self::Less => "less",
            Self::Lesseq => "lesseq",
            Self::Greater => "greater",
            Self::Greatereq => "greatereq",
            Self::Isint => "isint",
            Self::Isreal => "isreal",
            Self::Isbool => "isbool",
            Self::Isnull => "isnull",
            Self::Isatom => "isatom",
            Self::Islist => "islist",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::Eval => "eval",
        }
    }

    /// Looks a name up in the keyword set.
    ///
    /// ## Example
    /// ```
    /// use lisq::interpreter::lexer::Keyword;
    ///
    /// assert_eq!(Keyword::from_name("setq"), Some(Keyword::Setq));
    /// assert_eq!(Keyword::from_name("setqq"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Returns `true` for the keywords with custom binding or control-flow
    /// rules; the rest are ordinary builtins.
    #[must_use]
    pub const fn is_special_form(self) -> bool {
        matches!(self,
                 Self::Quote
                 | Self::Setq
                 | Self::Func
                 | Self::Lambda
                 | Self::Prog
                 | Self::Cond
                 | Self::While
                 | Self::Return
                 | Self::Break)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a lexical token in the source input.
///
/// Tokens carry their payload but no source position; the parser counts
/// [`Token::Newline`] markers to reconstruct 1-based line numbers. Any
/// maximal run of characters that fits none of the classifications below is
/// preserved as [`Token::Unknown`] — the lexer itself never fails.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[+-]?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[+-]?\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[+-]?[0-9]+[eE][+-]?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42` or `-7`.
    ///
    /// A whole-number literal with no fractional part and no exponent is
    /// always an integer, never a real.
    #[regex(r"[+-]?[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// The `null` literal.
    #[token("null")]
    Null,
    /// A keyword from the closed set recognized by the language.
    #[token("quote", |_| Keyword::Quote)]
    #[token("setq", |_| Keyword::Setq)]
    #[token("func", |_| Keyword::Func)]
    #[token("lambda", |_| Keyword::Lambda)]
    #[token("prog", |_| Keyword::Prog)]
    #[token("cond", |_| Keyword::Cond)]
    #[token("while", |_| Keyword::While)]
    #[token("return", |_| Keyword::Return)]
    #[token("break", |_| Keyword::Break)]
    #[token("plus", |_| Keyword::Plus)]
    #[token("minus", |_| Keyword::Minus)]
    #[token("times", |_| Keyword::Times)]
    #[token("divide", |_| Keyword::Divide)]
    #[token("head", |_| Keyword::Head)]
    #[token("tail", |_| Keyword::Tail)]
    #[token("cons", |_| Keyword::Cons)]
    #[token("equal", |_| Keyword::Equal)]
    #[token("nonequal", |_| Keyword::Nonequal)]
    #[token("less", |_| Keyword::Less)]
    #[token("lesseq", |_| Keyword::Lesseq)]
    #[token("greater", |_| Keyword::Greater)]
    #[token("greatereq", |_| Keyword::Greatereq)]
    #[token("isint", |_| Keyword::Isint)]
    #[token("isreal", |_| Keyword::Isreal)]
    #[token("isbool", |_| Keyword::Isbool)]
    #[token("isnull", |_| Keyword::Isnull)]
    #[token("isatom", |_| Keyword::Isatom)]
    #[token("islist", |_| Keyword::Islist)]
    #[token("and", |_| Keyword::And)]
    #[token("or", |_| Keyword::Or)]
    #[token("xor", |_| Keyword::Xor)]
    #[token("not", |_| Keyword::Not)]
    #[token("eval", |_| Keyword::Eval)]
    Keyword(Keyword),
    /// Identifier tokens; names made of letters only, such as `x` or `maker`.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `'`
    #[token("'")]
    QuoteMark,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// An explicit line break, kept for line-accurate diagnostics.
    #[token("\n")]
    Newline,
    /// A maximal run of atom characters that fits no other classification,
    /// such as `12.` or `x1`. Deferred to the parser, which rejects it or,
    /// in lenient mode, accepts it as an atom.
    #[regex(r"[^ \t\r\f\n()']+", |lex| lex.slice().to_string(), priority = 0)]
    Unknown(String),
}

/// Parses a real literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Scans the whole source into a token sequence.
///
/// This is a single left-to-right pass with no backtracking and no errors:
/// lexemes the grammar does not recognize come back as [`Token::Unknown`]
/// with their raw text.
///
/// ## Example
/// ```
/// use lisq::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("(plus 1 2)");
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens[2], Token::Integer(1));
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(()) => tokens.push(Token::Unknown(lexer.slice().to_string())),
        }
    }

    tokens
}
