use std::rc::Rc;

use crate::{
    ast::Element,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::FunctionValue},
    util::num::{as_exact_i64, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models every result evaluation can produce: the four literal
/// kinds, symbolic atoms (from quoted data), lists, and function objects.
/// Compound payloads are reference counted so values can be shared without
/// deep copies.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
    /// A boolean value.
    Bool(bool),
    /// The null value.
    Null,
    /// A symbolic atom, produced by quoting.
    Atom(String),
    /// An ordered list of values.
    List(Rc<Vec<Value>>),
    /// A function object with its captured environment.
    Function(Rc<FunctionValue>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            // Function values compare by identity.
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(Rc::new(items))
    }
}

impl Value {
    /// Builds the numeric value for a computed `f64` result.
    ///
    /// Arithmetic builtins compute in real precision and re-promote to an
    /// integer exactly when the mathematical result has no fractional part;
    /// this mirrors [`crate::ast::Element::number`] bit for bit so constant
    /// folding stays observationally transparent.
    ///
    /// ## Example
    /// ```
    /// use lisq::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::number(3.0), Value::Integer(3));
    /// assert_eq!(Value::number(1.5), Value::Real(1.5));
    /// ```
    #[must_use]
    pub fn number(value: f64) -> Self {
        as_exact_i64(value).map_or(Self::Real(value), Self::Integer)
    }

    /// Converts an element into a value without evaluating it.
    ///
    /// This is the structural conversion `quote` performs: literals map to
    /// themselves, atoms stay symbolic, and lists convert recursively.
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        match element {
            Element::Atom(name) => Self::Atom(name.clone()),
            Element::Integer(n) => Self::Integer(*n),
            Element::Real(r) => Self::Real(*r),
            Element::Bool(b) => Self::Bool(*b),
            Element::Null => Self::Null,
            Element::List(items) => {
                Self::List(Rc::new(items.iter().map(Self::from_element).collect()))
            },
        }
    }

    /// Converts a value back into an element, as `eval` requires.
    ///
    /// # Errors
    /// Function objects have no source form; converting one is a type
    /// error.
    pub fn to_element(&self, line: usize) -> EvalResult<Element> {
        match self {
            Self::Integer(n) => Ok(Element::Integer(*n)),
            Self::Real(r) => Ok(Element::Real(*r)),
            Self::Bool(b) => Ok(Element::Bool(*b)),
            Self::Null => Ok(Element::Null),
            Self::Atom(name) => Ok(Element::Atom(name.clone())),
            Self::List(items) => items.iter()
                                      .map(|item| item.to_element(line))
                                      .collect::<EvalResult<Vec<_>>>()
                                      .map(Element::List),
            Self::Function(_) => Err(RuntimeError::TypeError {
                details: "a function value cannot be evaluated as data".to_string(),
                line,
            }),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Integers beyond the range `f64` represents exactly are rejected
    /// rather than silently rounded.
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::IntegerTooLarge { line }),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to an `f64` for comparison, coercing booleans to
    /// `1.0`/`0.0`.
    pub fn as_coerced_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            _ => self.as_number(line),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Borrows the value's items, or returns an error if not a list.
    pub fn as_list(&self, line: usize) -> EvalResult<&Vec<Self>> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(RuntimeError::ExpectedList { line }),
        }
    }

    /// Returns `true` if the value is [`Integer`](Self::Integer).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Real`](Self::Real).
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(..))
    }

    /// Returns `true` if the value is [`Bool`](Self::Bool).
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Null`](Self::Null).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Atom`](Self::Atom).
    #[must_use]
    pub const fn is_atom(&self) -> bool {
        matches!(self, Self::Atom(..))
    }

    /// Returns `true` if the value is [`List`](Self::List).
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
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
            Self::Atom(name) => write!(f, "{name}"),
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
            Self::Function(function) => write!(f, "#<function/{}>", function.params.len()),
        }
    }
}
