use crate::{
    ast::{Element, Node},
    error::ParseError,
    interpreter::lexer::{Keyword, Token},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A recovering recursive-descent parser over a token stream.
///
/// The parser never fails as a whole: [`Parser::parse_program`] accumulates
/// an ordered list of diagnostics and always returns whatever top-level
/// nodes it managed to recover. Line numbers are reconstructed by counting
/// the newline tokens consumed so far; the tokens themselves carry no
/// positions.
///
/// In lenient mode, unknown lexemes are folded into the AST as plain atoms
/// instead of being rejected, so malformed input still produces a complete
/// tree for exploratory tooling.
pub struct Parser<'a> {
    tokens:      &'a [Token],
    pos:         usize,
    line:        usize,
    lenient:     bool,
    diagnostics: Vec<ParseError>,
    halted:      bool,
}

impl<'a> Parser<'a> {
    /// Creates a strict parser over a token stream.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self::with_mode(tokens, false)
    }

    /// Creates a lenient parser that accepts unknown lexemes as atoms.
    #[must_use]
    pub const fn lenient(tokens: &'a [Token]) -> Self {
        Self::with_mode(tokens, true)
    }

    const fn with_mode(tokens: &'a [Token], lenient: bool) -> Self {
        Self { tokens,
               pos: 0,
               line: 1,
               lenient,
               diagnostics: Vec::new(),
               halted: false }
    }

    /// Parses the whole token stream into top-level nodes.
    ///
    /// Never returns an error: syntax problems are recorded as diagnostics
    /// and parsing resumes at the next statement boundary, so every
    /// syntactically valid sibling form still yields a node.
    ///
    /// ## Example
    /// ```
    /// use lisq::interpreter::{lexer::tokenize, parser::Parser};
    ///
    /// let tokens = tokenize("(setq a 1)\n(setq b 2)");
    /// let (nodes, diagnostics) = Parser::new(&tokens).parse_program();
    ///
    /// assert_eq!(nodes.len(), 2);
    /// assert_eq!(nodes[1].line, 2);
    /// assert!(diagnostics.is_empty());
    /// ```
    #[must_use]
    pub fn parse_program(mut self) -> (Vec<Node>, Vec<ParseError>) {
        let mut nodes = Vec::new();

        while !self.halted {
            match self.peek() {
                None => break,
                Some(Token::Newline) => {
                    self.advance();
                },
                Some(Token::RParen) => {
                    self.diagnostics
                        .push(ParseError::UnmatchedClosingParen { line: self.line });
                    self.advance();
                },
                Some(_) => {
                    let line = self.line;
                    match self.parse_element() {
                        Ok(element) => nodes.push(Node::new(element, line)),
                        Err(error) => {
                            self.diagnostics.push(error);
                            self.synchronize();
                        },
                    }
                },
            }
        }

        (nodes, self.diagnostics)
    }

    /// Consumes and returns one element.
    ///
    /// This is the recursive unit of the grammar: literals and atoms are
    /// single tokens, a quote mark desugars to a two-element `quote` list,
    /// and an opening parenthesis recurses until the matching closer.
    /// Keywords encountered here are not in head position and therefore
    /// become plain atoms.
    fn parse_element(&mut self) -> ParseResult<Element> {
        loop {
            let Some(token) = self.advance() else {
                self.halted = true;
                return Err(ParseError::UnexpectedEndOfInput { line: self.line });
            };

            return match token {
                Token::Newline => continue,
                Token::Integer(n) => Ok(Element::Integer(*n)),
                Token::Real(r) => Ok(Element::Real(*r)),
                Token::Bool(b) => Ok(Element::Bool(*b)),
                Token::Null => Ok(Element::Null),
                Token::Identifier(name) => Ok(Element::Atom(name.clone())),
                Token::Keyword(keyword) => Ok(Element::Atom(keyword.as_str().to_string())),
                Token::QuoteMark => {
                    let quoted = self.parse_element()?;
                    Ok(Element::List(vec![Element::Atom(Keyword::Quote.as_str().to_string()),
                                          quoted]))
                },
                Token::LParen => self.parse_list(),
                Token::RParen => Err(ParseError::UnmatchedClosingParen { line: self.line }),
                Token::Unknown(text) => {
                    if self.lenient {
                        Ok(Element::Atom(text.clone()))
                    } else {
                        Err(ParseError::UnrecognizedLexeme { text: text.clone(),
                                                             line: self.line })
                    }
                },
            };
        }
    }

    /// Parses list items after an opening parenthesis.
    ///
    /// Newlines inside a list only advance the line counter. Reaching the
    /// end of input with the list still open is reported once and stops
    /// parsing altogether.
    fn parse_list(&mut self) -> ParseResult<Element> {
        let mut items = Vec::new();

        loop {
            match self.peek() {
                None => {
                    self.halted = true;
                    return Err(ParseError::MissingClosingParen { line: self.line });
                },
                Some(Token::Newline) => {
                    self.advance();
                },
                Some(Token::RParen) => {
                    self.advance();
                    return Ok(Element::List(items));
                },
                Some(_) => items.push(self.parse_element()?),
            }
        }
    }

    /// Skips ahead to the next statement boundary after an error.
    ///
    /// Tokens are dropped up to the next newline (left for the line
    /// counter) or opening parenthesis (left untouched so a well-formed
    /// nested form still parses). A closing parenthesis belonged to the
    /// broken form and is consumed with it.
    fn synchronize(&mut self) {
        while let Some(token) = self.peek() {
            match token {
                Token::Newline | Token::LParen => break,
                Token::RParen => {
                    self.advance();
                    break;
                },
                _ => {
                    self.advance();
                },
            }
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        if matches!(token, Token::Newline) {
            self.line += 1;
        }
        Some(token)
    }
}
