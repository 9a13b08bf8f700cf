use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A mutable name-to-value binding frame linked to an enclosing frame.
///
/// A fresh frame is created for the global top level, for every `prog`
/// block, and for every function or lambda call. Frames are shared through
/// `Rc<RefCell<_>>` handles: a closure that captured a frame and the code
/// still executing in it see the same bindings, so later `setq` mutations
/// are observed through the closure rather than lost to a copy. Evaluation
/// is single threaded, so the interior mutability needs no locking.
pub struct Environment {
    vars:   HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates the global top-level frame.
    #[must_use]
    pub fn root() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { vars:   HashMap::new(),
                                    parent: None, }))
    }

    /// Creates a child frame whose lookups fall through to `parent`.
    #[must_use]
    pub fn child(parent: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { vars:   HashMap::new(),
                                    parent: Some(Rc::clone(parent)), }))
    }

    /// Binds a name in this frame, shadowing any outer binding of the same
    /// name for code resolving through this frame.
    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Resolves a name through the frame chain, innermost first.
    ///
    /// ## Example
    /// ```
    /// use lisq::interpreter::{evaluator::env::Environment, value::core::Value};
    ///
    /// let globals = Environment::root();
    /// globals.borrow_mut().define("x", Value::Integer(5));
    ///
    /// let inner = Environment::child(&globals);
    /// assert_eq!(Environment::get(&inner, "x"), Some(Value::Integer(5)));
    /// assert_eq!(Environment::get(&inner, "y"), None);
    /// ```
    #[must_use]
    pub fn get(env: &Rc<RefCell<Self>>, name: &str) -> Option<Value> {
        let mut current = Rc::clone(env);
        loop {
            let next = {
                let frame = current.borrow();
                if let Some(value) = frame.vars.get(name) {
                    return Some(value.clone());
                }
                frame.parent.clone()
            };
            current = next?;
        }
    }
}
