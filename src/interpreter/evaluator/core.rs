use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Element, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{builtins, env::Environment},
        lexer::Keyword,
        value::{core::Value, function::FunctionValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of evaluating one element.
///
/// `return` and `break` are not errors: they are control signals that
/// unwind through every in-progress evaluation until the boundary that
/// intercepts them — the nearest call or `prog` block for `Return`, the
/// nearest `while` loop for `Break`. Every recursive evaluation step either
/// re-propagates a signal or intercepts it.
pub enum Flow {
    /// Ordinary completion with a value.
    Normal(Value),
    /// A `return` signal carrying the value to return.
    Return(Value),
    /// A `break` signal.
    Break,
}

/// Unwraps an evaluation to its value, re-propagating control signals.
macro_rules! value_of {
    ($flow:expr) => {
        match $flow? {
            Flow::Normal(value) => value,
            flow => return Ok(flow),
        }
    };
}

/// The tree-walking evaluator.
///
/// Evaluation is strict, call by value, depth first and left to right:
/// every multi-argument form evaluates its operands in source order before
/// dispatch, which fixes the observable side-effect ordering. Nested
/// elements carry no positions, so the evaluator remembers the line of the
/// top-level form in progress and reports every runtime error against it.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    line:    usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty global environment.
    #[must_use]
    pub fn new() -> Self {
        Self { globals: Environment::root(),
               line:    1, }
    }

    /// Evaluates top-level forms in order, returning one value per form.
    ///
    /// The first runtime error aborts the run. A `return` or `break` signal
    /// reaching the top level is a structural error.
    ///
    /// ## Example
    /// ```
    /// use lisq::interpreter::{
    ///     evaluator::core::Interpreter,
    ///     lexer::tokenize,
    ///     parser::Parser,
    ///     value::core::Value,
    /// };
    ///
    /// let tokens = tokenize("(setq x 2) (plus x 1)");
    /// let (nodes, _) = Parser::new(&tokens).parse_program();
    ///
    /// let values = Interpreter::new().interpret(&nodes).unwrap();
    /// assert_eq!(values, vec![Value::Integer(2), Value::Integer(3)]);
    /// ```
    pub fn interpret(&mut self, nodes: &[Node]) -> EvalResult<Vec<Value>> {
        let globals = Rc::clone(&self.globals);
        let mut values = Vec::with_capacity(nodes.len());

        for node in nodes {
            self.line = node.line;
            match self.eval(&node.element, &globals)? {
                Flow::Normal(value) => values.push(value),
                Flow::Return(_) => {
                    return Err(RuntimeError::ReturnOutsideBlock { line: self.line });
                },
                Flow::Break => return Err(RuntimeError::BreakOutsideLoop { line: self.line }),
            }
        }

        Ok(values)
    }

    /// Evaluates one element in the given environment.
    ///
    /// Literals evaluate to themselves, atoms resolve through the
    /// environment chain, and lists dispatch on their head: a special form,
    /// a builtin, a named function, or a computed function expression.
    fn eval(&mut self, element: &Element, env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        match element {
            Element::Integer(n) => Ok(Flow::Normal(Value::Integer(*n))),
            Element::Real(r) => Ok(Flow::Normal(Value::Real(*r))),
            Element::Bool(b) => Ok(Flow::Normal(Value::Bool(*b))),
            Element::Null => Ok(Flow::Normal(Value::Null)),
            Element::Atom(name) => {
                Environment::get(env, name).map(Flow::Normal)
                                           .ok_or_else(|| RuntimeError::UndefinedAtom {
                                               name: name.clone(),
                                               line: self.line,
                                           })
            },
            Element::List(items) => self.eval_list(items, env),
        }
    }

    fn eval_list(&mut self, items: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let Some((head, args)) = items.split_first() else {
            return Err(RuntimeError::TypeError { details:
                                                     "cannot evaluate an empty list".to_string(),
                                                 line: self.line, });
        };

        // Keywords in head position always dispatch to the form or builtin,
        // even when a variable of the same name is bound.
        if let Some(keyword) = head.as_atom().and_then(Keyword::from_name) {
            return self.eval_keyword(keyword, args, env);
        }

        let (function, name) = match head {
            Element::Atom(name) => match Environment::get(env, name) {
                Some(Value::Function(function)) => (function, name.as_str()),
                Some(_) => return Err(RuntimeError::NotCallable { line: self.line }),
                None => {
                    return Err(RuntimeError::UndefinedFunction { name: name.clone(),
                                                                 line: self.line, });
                },
            },
            _ => match value_of!(self.eval(head, env)) {
                Value::Function(function) => (function, "lambda"),
                _ => return Err(RuntimeError::NotCallable { line: self.line }),
            },
        };

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(value_of!(self.eval(arg, env)));
        }

        self.apply(&function, name, arg_values).map(Flow::Normal)
    }

    fn eval_keyword(&mut self,
                    keyword: Keyword,
                    args: &[Element],
                    env: &Rc<RefCell<Environment>>)
                    -> EvalResult<Flow> {
        match keyword {
            Keyword::Quote => self.eval_quote(args),
            Keyword::Setq => self.eval_setq(args, env),
            Keyword::Func => self.eval_func(args, env),
            Keyword::Lambda => self.eval_lambda(args, env),
            Keyword::Prog => self.eval_prog(args, env),
            Keyword::Cond => self.eval_cond(args, env),
            Keyword::While => self.eval_while(args, env),
            Keyword::Return => self.eval_return(args, env),
            Keyword::Break => {
                if args.is_empty() {
                    Ok(Flow::Break)
                } else {
                    Err(self.malformed(Keyword::Break, "takes no arguments"))
                }
            },
            Keyword::Eval => self.eval_eval(args, env),
            builtin => self.eval_builtin(builtin, args, env),
        }
    }

    /// `(quote expr)` — returns the argument as data, unevaluated.
    fn eval_quote(&mut self, args: &[Element]) -> EvalResult<Flow> {
        let [quoted] = args else {
            return Err(self.malformed(Keyword::Quote, "expected exactly one argument"));
        };
        Ok(Flow::Normal(Value::from_element(quoted)))
    }

    /// `(setq name expr)` — evaluates the expression and binds the name in
    /// the current environment, shadowing outer bindings of the same name.
    fn eval_setq(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let [target, value_expr] = args else {
            return Err(self.malformed(Keyword::Setq, "expected a target atom and a value"));
        };
        let Some(name) = target.as_atom() else {
            return Err(self.malformed(Keyword::Setq, "target must be an atom"));
        };

        let value = value_of!(self.eval(value_expr, env));
        env.borrow_mut().define(name, value.clone());
        Ok(Flow::Normal(value))
    }

    /// `(func name (params) body)` — builds a closure over the defining
    /// environment and binds it there, so later same-scope references,
    /// including recursive calls from the body, resolve it.
    fn eval_func(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let [name_el, params_el, body] = args else {
            return Err(self.malformed(Keyword::Func,
                                      "expected a name, a parameter list and a body"));
        };
        let Some(name) = name_el.as_atom() else {
            return Err(self.malformed(Keyword::Func, "name must be an atom"));
        };
        let Some(params) = params_el.atom_names() else {
            return Err(self.malformed(Keyword::Func, "parameters must be a list of atoms"));
        };

        let function =
            Value::Function(Rc::new(FunctionValue::new(params, body.clone(), Rc::clone(env))));
        env.borrow_mut().define(name, function.clone());
        Ok(Flow::Normal(function))
    }

    /// `(lambda (params) body)` — builds an anonymous closure over the
    /// current environment without binding any name.
    fn eval_lambda(&mut self,
                   args: &[Element],
                   env: &Rc<RefCell<Environment>>)
                   -> EvalResult<Flow> {
        let [params_el, body] = args else {
            return Err(self.malformed(Keyword::Lambda, "expected a parameter list and a body"));
        };
        let Some(params) = params_el.atom_names() else {
            return Err(self.malformed(Keyword::Lambda, "parameters must be a list of atoms"));
        };

        Ok(Flow::Normal(Value::Function(Rc::new(FunctionValue::new(params,
                                                                   body.clone(),
                                                                   Rc::clone(env))))))
    }

    /// `(prog (locals) forms…)` — evaluates forms in one fresh child
    /// environment with the locals pre-bound to null. Intercepts `return`;
    /// lets `break` keep unwinding.
    fn eval_prog(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let Some((locals_el, body)) = args.split_first() else {
            return Err(self.malformed(Keyword::Prog, "expected a list of locals"));
        };
        let Some(locals) = locals_el.atom_names() else {
            return Err(self.malformed(Keyword::Prog, "locals must be a list of atoms"));
        };

        let scope = Environment::child(env);
        {
            let mut frame = scope.borrow_mut();
            for name in &locals {
                frame.define(name, Value::Null);
            }
        }

        let mut last = Value::Null;
        for form in body {
            match self.eval(form, &scope)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Normal(value)),
                Flow::Break => return Ok(Flow::Break),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// `(cond test then else?)` — the test must evaluate to a boolean; the
    /// untaken branch is never evaluated, and a missing else yields null.
    fn eval_cond(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let (condition, then_branch, else_branch) = match args {
            [condition, then_branch] => (condition, then_branch, None),
            [condition, then_branch, else_branch] => (condition, then_branch, Some(else_branch)),
            _ => {
                return Err(self.malformed(Keyword::Cond,
                                          "expected a condition and one or two branches"));
            },
        };

        let test = value_of!(self.eval(condition, env)).as_bool(self.line)?;
        if test {
            self.eval(then_branch, env)
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch, env)
        } else {
            Ok(Flow::Normal(Value::Null))
        }
    }

    /// `(while test forms…)` — body forms run in the enclosing environment,
    /// no new scope per iteration. Intercepts `break` (loop result null);
    /// lets `return` keep unwinding. The loop result is the value of the
    /// last body form of the final iteration, or null if the body never
    /// ran.
    fn eval_while(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let Some((condition, body)) = args.split_first() else {
            return Err(self.malformed(Keyword::While, "expected a condition"));
        };

        let mut last = Value::Null;
        loop {
            let go = value_of!(self.eval(condition, env)).as_bool(self.line)?;
            if !go {
                break;
            }
            for form in body {
                match self.eval(form, env)? {
                    Flow::Normal(value) => last = value,
                    Flow::Return(value) => return Ok(Flow::Return(value)),
                    Flow::Break => return Ok(Flow::Normal(Value::Null)),
                }
            }
        }
        Ok(Flow::Normal(last))
    }

    /// `(return expr)` — raises the return signal with the evaluated value.
    fn eval_return(&mut self,
                   args: &[Element],
                   env: &Rc<RefCell<Environment>>)
                   -> EvalResult<Flow> {
        let [value_expr] = args else {
            return Err(self.malformed(Keyword::Return, "expected exactly one value"));
        };
        let value = value_of!(self.eval(value_expr, env));
        Ok(Flow::Return(value))
    }

    /// `(eval expr)` — a list value is converted back into an element and
    /// re-enters the evaluator in the current environment; every other
    /// value is self-evaluating and returned unchanged.
    fn eval_eval(&mut self, args: &[Element], env: &Rc<RefCell<Environment>>) -> EvalResult<Flow> {
        let [arg] = args else {
            return Err(RuntimeError::ArgumentCountMismatch { name: Keyword::Eval.as_str()
                                                                                .to_string(),
                                                             line: self.line, });
        };

        let value = value_of!(self.eval(arg, env));
        match value {
            Value::List(_) => {
                let element = value.to_element(self.line)?;
                self.eval(&element, env)
            },
            other => Ok(Flow::Normal(other)),
        }
    }

    /// Evaluates every argument in source order, then dispatches a builtin.
    fn eval_builtin(&mut self,
                    keyword: Keyword,
                    args: &[Element],
                    env: &Rc<RefCell<Environment>>)
                    -> EvalResult<Flow> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(value_of!(self.eval(arg, env)));
        }
        builtins::call(keyword, &values, self.line).map(Flow::Normal)
    }

    /// Applies a function value to evaluated arguments.
    ///
    /// The new frame's parent is the function's closure environment, not
    /// the caller's — that is what makes scoping lexical. A `return`
    /// escaping the body becomes the call's value; a `break` escaping the
    /// body has no enclosing loop left and is a runtime error.
    fn apply(&mut self,
             function: &FunctionValue,
             name: &str,
             args: Vec<Value>)
             -> EvalResult<Value> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             line: self.line, });
        }

        let scope = Environment::child(&function.env);
        {
            let mut frame = scope.borrow_mut();
            for (param, value) in function.params.iter().zip(args) {
                frame.define(param, value);
            }
        }

        match self.eval(&function.body, &scope)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break => Err(RuntimeError::BreakOutsideLoop { line: self.line }),
        }
    }

    fn malformed(&self, keyword: Keyword, details: &str) -> RuntimeError {
        RuntimeError::MalformedForm { form:    keyword.as_str(),
                                      details: details.to_string(),
                                      line:    self.line, }
    }
}
