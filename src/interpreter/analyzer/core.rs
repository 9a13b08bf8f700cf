use crate::{
    ast::{Element, Node},
    error::SemanticError,
    interpreter::{
        analyzer::{
            builtins,
            scope::{FunctionInfo, ScopeId, SymbolTable},
            types::{InferredType, infer_type},
        },
        lexer::Keyword,
    },
};

/// Analyzes a whole program and returns every diagnostic found.
///
/// The analyzer visits all forms, never mutates the AST, and never stops at
/// the first problem. Its diagnostics are advisory: whether they block
/// evaluation is the caller's policy.
///
/// ## Example
/// ```
/// use lisq::interpreter::{analyzer::core::analyze, lexer::tokenize, parser::Parser};
///
/// let tokens = tokenize("(plus 1 true)");
/// let (nodes, _) = Parser::new(&tokens).parse_program();
///
/// let diagnostics = analyze(&nodes);
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[must_use]
pub fn analyze(nodes: &[Node]) -> Vec<SemanticError> {
    let mut analyzer = Analyzer { table:       SymbolTable::new(),
                                  diagnostics: Vec::new(),
                                  line:        1, };
    let ctx = Ctx::top();

    for node in nodes {
        analyzer.line = node.line;
        analyzer.check_element(&node.element, ctx);
    }

    analyzer.diagnostics
}

/// Where in the program the analyzer currently is.
///
/// The flags validate `return` (legal inside a `prog` block or a function
/// body) and `break` (legal inside a `while` body). Function bodies reset
/// the loop flag: a `break` inside a lambda does not belong to a loop
/// outside it.
#[derive(Clone, Copy)]
struct Ctx {
    scope:       ScopeId,
    in_prog:     bool,
    in_loop:     bool,
    in_function: bool,
}

impl Ctx {
    const fn top() -> Self {
        Self { scope:       SymbolTable::ROOT,
               in_prog:     false,
               in_loop:     false,
               in_function: false, }
    }
}

struct Analyzer {
    table:       SymbolTable,
    diagnostics: Vec<SemanticError>,
    line:        usize,
}

impl Analyzer {
    fn check_element(&mut self, element: &Element, ctx: Ctx) {
        match element {
            Element::Atom(name) => self.check_atom(name, ctx),
            Element::List(items) => self.check_list(items, ctx),
            // Literals are always fine.
            _ => {},
        }
    }

    /// A bare atom reference must resolve to something; keywords used as
    /// plain atoms are left alone.
    fn check_atom(&mut self, name: &str, ctx: Ctx) {
        if Keyword::from_name(name).is_some() {
            return;
        }
        if !self.table.is_bound(ctx.scope, name) {
            self.diagnostics
                .push(SemanticError::UndeclaredIdentifier { name: name.to_string(),
                                                            line: self.line, });
        }
    }

    fn check_list(&mut self, items: &[Element], ctx: Ctx) {
        let Some((head, args)) = items.split_first() else {
            return;
        };

        if let Some(keyword) = head.as_atom().and_then(Keyword::from_name) {
            self.check_form(keyword, args, ctx);
        } else if let Element::Atom(name) = head {
            self.check_user_call(name, args, ctx);
        } else {
            self.check_computed_call(head, args, ctx);
        }
    }

    fn check_form(&mut self, keyword: Keyword, args: &[Element], ctx: Ctx) {
        match keyword {
            Keyword::Quote => {
                // Quoting suppresses analysis exactly as it suppresses
                // evaluation: the argument is never descended into.
                if args.len() != 1 {
                    self.malformed(Keyword::Quote, "expected exactly one argument");
                }
            },
            Keyword::Setq => self.check_setq(args, ctx),
            Keyword::Func => self.check_func(args, ctx),
            Keyword::Lambda => self.check_lambda(args, ctx),
            Keyword::Prog => self.check_prog(args, ctx),
            Keyword::Cond => self.check_cond(args, ctx),
            Keyword::While => self.check_while(args, ctx),
            Keyword::Return => {
                if !(ctx.in_prog || ctx.in_function) {
                    self.diagnostics
                        .push(SemanticError::ReturnOutsideBlock { line: self.line });
                }
                if let [value] = args {
                    self.check_element(value, ctx);
                } else {
                    self.malformed(Keyword::Return, "expected exactly one value");
                }
            },
            Keyword::Break => {
                if !ctx.in_loop {
                    self.diagnostics
                        .push(SemanticError::BreakOutsideLoop { line: self.line });
                }
                if !args.is_empty() {
                    self.malformed(Keyword::Break, "takes no arguments");
                }
            },
            builtin => self.check_builtin_call(builtin, args, ctx),
        }
    }

    /// `setq` analyzes the value first, then records the target's inferred
    /// type in the current scope; redefinition overwrites.
    fn check_setq(&mut self, args: &[Element], ctx: Ctx) {
        let [target, value] = args else {
            self.malformed(Keyword::Setq, "expected a target atom and a value expression");
            return;
        };
        let Some(name) = target.as_atom() else {
            self.malformed(Keyword::Setq, "target must be an atom");
            return;
        };

        self.check_element(value, ctx);
        let inferred = infer_type(value, &self.table, ctx.scope, 0);
        self.table.define_var(ctx.scope, name, inferred);
    }

    /// `func` registers the function in the defining scope before the body
    /// is analyzed, so self-recursion resolves.
    fn check_func(&mut self, args: &[Element], ctx: Ctx) {
        let [name_el, params_el, body] = args else {
            self.malformed(Keyword::Func, "expected a name, a parameter list and a body");
            return;
        };
        let Some(name) = name_el.as_atom() else {
            self.malformed(Keyword::Func, "name must be an atom");
            return;
        };
        let Some(params) = params_el.atom_names() else {
            self.malformed(Keyword::Func, "parameters must be a list of atoms");
            return;
        };

        self.table.define_func(ctx.scope,
                               name,
                               FunctionInfo { params: params.clone(),
                                              body:   body.clone(), });
        self.check_body(&params, body, ctx);
    }

    fn check_lambda(&mut self, args: &[Element], ctx: Ctx) {
        let [params_el, body] = args else {
            self.malformed(Keyword::Lambda, "expected a parameter list and a body");
            return;
        };
        let Some(params) = params_el.atom_names() else {
            self.malformed(Keyword::Lambda, "parameters must be a list of atoms");
            return;
        };

        self.check_body(&params, body, ctx);
    }

    /// Analyzes a function body once, in a fresh child scope seeded with
    /// `any`-typed parameters.
    fn check_body(&mut self, params: &[String], body: &Element, ctx: Ctx) {
        let scope = self.table.push_child(ctx.scope);
        for param in params {
            self.table.define_var(scope, param, InferredType::Any);
        }

        let body_ctx = Ctx { scope,
                             in_prog: false,
                             in_loop: false,
                             in_function: true, };
        self.check_element(body, body_ctx);
    }

    fn check_prog(&mut self, args: &[Element], ctx: Ctx) {
        let Some((locals_el, body)) = args.split_first() else {
            self.malformed(Keyword::Prog, "expected a list of locals");
            return;
        };
        let Some(locals) = locals_el.atom_names() else {
            self.malformed(Keyword::Prog, "locals must be a list of atoms");
            return;
        };

        let scope = self.table.push_child(ctx.scope);
        for local in &locals {
            self.table.define_var(scope, local, InferredType::Any);
        }

        let body_ctx = Ctx { scope,
                             in_prog: true,
                             ..ctx };
        for form in body {
            self.check_element(form, body_ctx);
        }
    }

    fn check_cond(&mut self, args: &[Element], ctx: Ctx) {
        if args.len() < 2 || args.len() > 3 {
            self.malformed(Keyword::Cond, "expected a condition and one or two branches");
            return;
        }

        self.check_condition(Keyword::Cond, &args[0], ctx);
        for branch in &args[1..] {
            self.check_element(branch, ctx);
        }
    }

    fn check_while(&mut self, args: &[Element], ctx: Ctx) {
        let Some((condition, body)) = args.split_first() else {
            self.malformed(Keyword::While, "expected a condition");
            return;
        };

        self.check_condition(Keyword::While, condition, ctx);
        let body_ctx = Ctx { in_loop: true, ..ctx };
        for form in body {
            self.check_element(form, body_ctx);
        }
    }

    fn check_condition(&mut self, form: Keyword, condition: &Element, ctx: Ctx) {
        self.check_element(condition, ctx);
        let inferred = infer_type(condition, &self.table, ctx.scope, 0);
        if !matches!(inferred, InferredType::Bool | InferredType::Any) {
            self.diagnostics
                .push(SemanticError::ConditionNotBoolean { form:  form.as_str(),
                                                           found: inferred.to_string(),
                                                           line:  self.line, });
        }
    }

    /// Checks a builtin call's arity and per-argument types against the
    /// declared signature.
    fn check_builtin_call(&mut self, keyword: Keyword, args: &[Element], ctx: Ctx) {
        for arg in args {
            self.check_element(arg, ctx);
        }

        let Some(spec) = builtins::builtin_spec(keyword) else {
            return;
        };

        if args.len() != spec.arity() {
            self.diagnostics
                .push(SemanticError::ArityMismatch { name:     keyword.as_str().to_string(),
                                                     expected: spec.arity(),
                                                     found:    args.len(),
                                                     line:     self.line, });
            return;
        }

        for (index, (arg, expected)) in args.iter().zip(spec.args.iter()).enumerate() {
            let inferred = infer_type(arg, &self.table, ctx.scope, 0);
            if !expected.admits(inferred) {
                self.diagnostics
                    .push(SemanticError::ArgumentTypeMismatch { name: keyword.as_str()
                                                                             .to_string(),
                                                                argument: index + 1,
                                                                expected: expected.name(),
                                                                found: inferred.to_string(),
                                                                line: self.line, });
            }
        }
    }

    /// A call whose head is an ordinary name: a known function (arity
    /// checked), a bound variable that may hold a function, or unknown.
    fn check_user_call(&mut self, name: &str, args: &[Element], ctx: Ctx) {
        for arg in args {
            self.check_element(arg, ctx);
        }

        let known_arity = self.table
                              .lookup_func(ctx.scope, name)
                              .map(|info| info.params.len());
        if let Some(expected) = known_arity {
            if args.len() != expected {
                self.diagnostics
                    .push(SemanticError::ArityMismatch { name: name.to_string(),
                                                         expected,
                                                         found: args.len(),
                                                         line: self.line, });
            }
            return;
        }

        // A bound variable may hold a function value; give it the benefit
        // of the doubt.
        if self.table.lookup_var(ctx.scope, name).is_some() {
            return;
        }

        self.diagnostics
            .push(SemanticError::UnknownCallee { name: name.to_string(),
                                                 line: self.line, });
    }

    /// A call whose head is itself a compound expression. The anonymous
    /// lambda shape `((lambda (params) body) args…)` gets its argument
    /// count checked; the head is analyzed once either way.
    fn check_computed_call(&mut self, head: &Element, args: &[Element], ctx: Ctx) {
        for arg in args {
            self.check_element(arg, ctx);
        }

        if let Some(expected) = lambda_param_count(head)
           && args.len() != expected
        {
            self.diagnostics
                .push(SemanticError::ArityMismatch { name: Keyword::Lambda.as_str().to_string(),
                                                     expected,
                                                     found: args.len(),
                                                     line: self.line, });
        }

        self.check_element(head, ctx);
    }

    fn malformed(&mut self, keyword: Keyword, details: &str) {
        self.diagnostics
            .push(SemanticError::MalformedForm { form:    keyword.as_str(),
                                                 details: details.to_string(),
                                                 line:    self.line, });
    }
}

/// Extracts the parameter count of a direct `(lambda (params) body)` head.
fn lambda_param_count(head: &Element) -> Option<usize> {
    let items = head.items()?;
    let keyword = items.first()?.as_atom().and_then(Keyword::from_name)?;
    if keyword != Keyword::Lambda {
        return None;
    }
    items.get(1)?.atom_names().map(|params| params.len())
}
