use std::{cell::RefCell, rc::Rc};

use crate::{ast::Element, interpreter::evaluator::env::Environment};

/// A function object: parameters, an unevaluated body, and the environment
/// that was active at the definition site.
///
/// The captured environment is shared, not copied — that is what makes the
/// function a closure, able to observe later mutations of the frame it was
/// defined in. Once built, the triple is immutable.
pub struct FunctionValue {
    /// Parameter names, bound positionally at every call.
    pub params: Vec<String>,
    /// The body element, evaluated per call in a fresh child environment.
    pub body:   Element,
    /// The closure environment the body resolves free atoms through.
    pub env:    Rc<RefCell<Environment>>,
}

impl FunctionValue {
    /// Bundles a closure triple.
    #[must_use]
    pub const fn new(params: Vec<String>, body: Element, env: Rc<RefCell<Environment>>) -> Self {
        Self { params, body, env }
    }
}

// The captured environment can reach this function again through a binding,
// so the derived representation would recurse; print the parameters only.
impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}
