use std::collections::{HashMap, HashSet};

use crate::{ast::Element, interpreter::analyzer::types::InferredType};

/// Index of a scope frame inside a [`SymbolTable`] arena.
pub type ScopeId = usize;

/// A user function recorded during analysis.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Parameter names, in order.
    pub params: Vec<String>,
    /// The unanalyzed body element.
    pub body:   Element,
}

#[derive(Debug, Default)]
struct Frame {
    parent: Option<ScopeId>,
    vars:   HashMap<String, InferredType>,
    funcs:  HashMap<String, FunctionInfo>,
}

/// An arena of scope frames with parent links by index.
///
/// Lookups walk the parent chain from the innermost frame outward. Normal
/// construction can never produce a cycle (children always point at frames
/// created earlier), but the walk still tracks visited frames so that a
/// pathological self-referential chain cannot loop forever.
#[derive(Debug)]
pub struct SymbolTable {
    frames: Vec<Frame>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// The global frame every table starts with.
    pub const ROOT: ScopeId = 0;

    /// Creates a table holding only the global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    /// Adds a fresh frame whose lookups fall through to `parent`.
    pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.frames.len();
        self.frames.push(Frame { parent: Some(parent),
                                 ..Frame::default() });
        id
    }

    /// Records a variable's inferred type; redefinition overwrites.
    pub fn define_var(&mut self, scope: ScopeId, name: &str, inferred: InferredType) {
        self.frames
            .get_mut(scope)
            .expect("scope id issued by this table")
            .vars
            .insert(name.to_string(), inferred);
    }

    /// Records a function definition in the given scope.
    pub fn define_func(&mut self, scope: ScopeId, name: &str, info: FunctionInfo) {
        self.frames
            .get_mut(scope)
            .expect("scope id issued by this table")
            .funcs
            .insert(name.to_string(), info);
    }

    /// Resolves a variable through the parent chain.
    #[must_use]
    pub fn lookup_var(&self, scope: ScopeId, name: &str) -> Option<InferredType> {
        let mut visited = HashSet::new();
        let mut current = Some(scope);

        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            let frame = self.frames.get(id)?;
            if let Some(inferred) = frame.vars.get(name) {
                return Some(*inferred);
            }
            current = frame.parent;
        }
        None
    }

    /// Resolves a function through the parent chain.
    #[must_use]
    pub fn lookup_func(&self, scope: ScopeId, name: &str) -> Option<&FunctionInfo> {
        let mut visited = HashSet::new();
        let mut current = Some(scope);

        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            let frame = self.frames.get(id)?;
            if let Some(info) = frame.funcs.get(name) {
                return Some(info);
            }
            current = frame.parent;
        }
        None
    }

    /// Returns `true` if the name resolves to a variable or a function.
    #[must_use]
    pub fn is_bound(&self, scope: ScopeId, name: &str) -> bool {
        self.lookup_var(scope, name).is_some() || self.lookup_func(scope, name).is_some()
    }
}
