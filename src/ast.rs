/// A single value in the abstract syntax tree.
///
/// `Element` covers everything a program can be built from: symbolic atoms,
/// the four literal kinds, and ordered lists. Lists are the only compound
/// form — special forms such as `setq` or `while` are ordinary lists whose
/// head atom names the form, so every later stage dispatches by inspecting
/// the first list element rather than matching on dedicated node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A symbolic atom: a keyword or an ordinary identifier.
    Atom(String),
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
    /// An ordered list of elements.
    List(Vec<Element>),
}

impl Element {
    /// Returns the atom name if this element is an atom.
    ///
    /// ## Example
    /// ```
    /// use lisq::ast::Element;
    ///
    /// assert_eq!(Element::Atom("x".to_string()).as_atom(), Some("x"));
    /// assert_eq!(Element::Integer(3).as_atom(), None);
    /// ```
    #[must_use]
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the list items if this element is a list.
    #[must_use]
    pub fn items(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets this element as a list of atom names.
    ///
    /// This is the shape shared by `func`/`lambda` parameter lists and
    /// `prog` locals. Returns `None` if the element is not a list or if any
    /// item is not an atom.
    ///
    /// ## Example
    /// ```
    /// use lisq::ast::Element;
    ///
    /// let params = Element::List(vec![Element::Atom("x".to_string()),
    ///                                 Element::Atom("y".to_string())]);
    /// assert_eq!(params.atom_names(),
    ///            Some(vec!["x".to_string(), "y".to_string()]));
    /// assert_eq!(Element::Integer(1).atom_names(), None);
    /// ```
    #[must_use]
    pub fn atom_names(&self) -> Option<Vec<String>> {
        self.items()?
            .iter()
            .map(|item| item.as_atom().map(str::to_string))
            .collect()
    }

    /// Returns `true` for the self-evaluating literal variants.
    ///
    /// Atoms are not literals (they resolve through an environment) and
    /// lists are not literals (they evaluate as forms or calls).
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self,
                 Self::Integer(..) | Self::Real(..) | Self::Bool(..) | Self::Null)
    }

    /// Builds the numeric element for a computed `f64` result.
    ///
    /// Results with no fractional part that are exactly representable as an
    /// integer become [`Element::Integer`]; everything else stays
    /// [`Element::Real`]. The evaluator applies the same rule to runtime
    /// values, which keeps constant folding observationally transparent.
    ///
    /// ## Example
    /// ```
    /// use lisq::ast::Element;
    ///
    /// assert_eq!(Element::number(3.0), Element::Integer(3));
    /// assert_eq!(Element::number(1.5), Element::Real(1.5));
    /// ```
    #[must_use]
    pub fn number(value: f64) -> Self {
        crate::util::num::as_exact_i64(value).map_or(Self::Real(value), Self::Integer)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<Element>> for Element {
    fn from(items: Vec<Element>) -> Self {
        Self::List(items)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atom(name) => write!(f, "{name}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => {
                if r.fract() == 0.0 && r.is_finite() {
                    write!(f, "{r:.1}")
                } else {
                    write!(f, "{r}")
                }
            },
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::List(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// A parsed top-level form paired with the 1-based source line it began on.
///
/// Line numbers exist purely for diagnostics; they never influence
/// evaluation. The optimizer produces new `Node`s rather than mutating
/// parsed ones in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The parsed element.
    pub element: Element,
    /// 1-based line on which the form began.
    pub line:    usize,
}

impl Node {
    /// Pairs an element with its starting source line.
    #[must_use]
    pub const fn new(element: Element, line: usize) -> Self {
        Self { element, line }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element)
    }
}
