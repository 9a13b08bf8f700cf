use std::fs;

use lisq::{
    RunOptions,
    error::RuntimeError,
    interpreter::{
        evaluator::core::Interpreter,
        lexer::tokenize,
        parser::Parser,
        value::core::Value,
    },
    run_source,
};
use walkdir::WalkDir;

fn run(src: &str) -> Vec<Value> {
    run_source(src, &RunOptions::default()).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn last(src: &str) -> Value {
    run(src).pop().expect("at least one value")
}

fn assert_failure(src: &str) {
    if run_source(src, &RunOptions::default()).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

/// Runs the program through parser and interpreter only, without the
/// analyzer gate, to observe genuine runtime errors.
fn interpret_raw(src: &str) -> Result<Vec<Value>, RuntimeError> {
    let tokens = tokenize(src);
    let (nodes, diagnostics) = Parser::new(&tokens).parse_program();
    assert!(diagnostics.is_empty(), "parse diagnostics: {diagnostics:?}");
    Interpreter::new().interpret(&nodes)
}

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| {
                                   e.path().extension().is_some_and(|ext| ext == "lisq")
                               })
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = run_source(&source, &RunOptions::default()) {
            panic!("Script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No scripts found in scripts/");
}

#[test]
fn literals_evaluate_to_themselves() {
    assert_eq!(last("42"), Value::Integer(42));
    assert_eq!(last("3.14"), Value::Real(3.14));
    assert_eq!(last("true"), Value::Bool(true));
    assert_eq!(last("false"), Value::Bool(false));
    assert_eq!(last("null"), Value::Null);
}

#[test]
fn arithmetic_promotion() {
    assert_eq!(last("(plus 1 2)"), Value::Integer(3));
    assert_eq!(last("(divide 3 2)"), Value::Real(1.5));
    assert_eq!(last("(divide (times 6 4) 4)"), Value::Integer(6));
    assert_eq!(last("(minus 1.5 0.5)"), Value::Integer(1));
    assert_eq!(last("(times 2 2.25)"), Value::Real(4.5));
}

#[test]
fn list_identity() {
    assert_eq!(last("(cons (head '(1 2 3)) (tail '(1 2 3)))"), last("'(1 2 3)"));
    assert_eq!(last("(tail '(9))"), Value::List(vec![].into()));
}

#[test]
fn type_predicates_are_total() {
    assert_eq!(last("(isint 3)"), Value::Bool(true));
    assert_eq!(last("(isreal 3)"), Value::Bool(false));
    assert_eq!(last("(isbool false)"), Value::Bool(true));
    assert_eq!(last("(isnull null)"), Value::Bool(true));
    assert_eq!(last("(isatom 'foo)"), Value::Bool(true));
    assert_eq!(last("(islist '(1))"), Value::Bool(true));
    assert_eq!(last("(islist null)"), Value::Bool(false));
}

#[test]
fn closures_capture_their_environment() {
    let src = "(prog () (setq maker (lambda (x) (lambda () x))) (setq f (maker 5)) (f))";
    assert_eq!(last(src), Value::Integer(5));
}

#[test]
fn closures_observe_later_mutations() {
    // The captured frame is aliased, not copied: the closure sees the setq
    // that happens after capture.
    let src = "(prog (x) (setq x 1) (setq get (lambda () x)) (setq x 2) (get))";
    assert_eq!(last(src), Value::Integer(2));
}

#[test]
fn break_exits_nearest_while() {
    let src = "(prog (i) (setq i 0) (while (less i 10) (setq i (plus i 1)) (cond (greater i 3) \
               (break))) i)";
    assert_eq!(last(src), Value::Integer(4));
}

#[test]
fn return_exits_nearest_boundary() {
    assert_eq!(last("(func test () (prog (a) (setq a 1) (return 99) 5)) (test)"),
               Value::Integer(99));

    // A return inside a loop exits the enclosing block, not just the loop.
    let src = "(func find () (prog (i) (setq i 0) (while (less i 10) (setq i (plus i 1)) (cond \
               (equal i 3) (return i))) -1)) (find)";
    assert_eq!(last(src), Value::Integer(3));
}

#[test]
fn while_loop_result_value() {
    assert_eq!(last("(prog (i) (setq i 0) (while (less i 3) (setq i (plus i 1))))"),
               Value::Integer(3));
    assert_eq!(last("(while false 1)"), Value::Null);
}

#[test]
fn cond_without_else_yields_null() {
    assert_eq!(last("(cond false 1)"), Value::Null);
    assert_eq!(last("(cond true 1)"), Value::Integer(1));
}

#[test]
fn side_effects_run_left_to_right() {
    let src = "(prog (a) (setq a 0) (plus (setq a (plus a 1)) (setq a (plus a 2))) a)";
    assert_eq!(last(src), Value::Integer(3));
}

#[test]
fn setq_binds_in_the_current_environment_only() {
    let src = "(setq x 1) (prog () (setq x 5) x) x";
    assert_eq!(run(src),
               vec![Value::Integer(1), Value::Integer(5), Value::Integer(1)]);
}

#[test]
fn recursion() {
    let src = "(func fact (n) (cond (lesseq n 1) 1 (times n (fact (minus n 1))))) (fact 5)";
    assert_eq!(last(src), Value::Integer(120));
}

#[test]
fn anonymous_lambda_call() {
    assert_eq!(last("((lambda (x y) (plus x y)) 2 3)"), Value::Integer(5));
}

#[test]
fn computed_function_call() {
    let src = "(func adder (n) (lambda (x) (plus x n))) ((adder 10) 5)";
    assert_eq!(last(src), Value::Integer(15));
}

#[test]
fn eval_reenters_current_environment() {
    assert_eq!(last("(setq x 4) (eval '(plus x 1))"), Value::Integer(5));
    assert_eq!(last("(eval 7)"), Value::Integer(7));
    assert_eq!(last("(eval 'foo)"), Value::Atom("foo".to_string()));
}

#[test]
fn keywords_are_plain_atoms_outside_head_position() {
    assert_eq!(last("'setq"), Value::Atom("setq".to_string()));
    assert_eq!(last("(setq plus 10) plus"), Value::Integer(10));
    // In head position the keyword still dispatches to the builtin.
    assert_eq!(last("(setq plus 10) (plus plus plus)"), Value::Integer(20));
}

#[test]
fn errors_surface() {
    assert_failure("(plus true 1)");
    assert_failure("(plus x 1)");
    assert_failure("(break)");
    assert_failure("(divide 1 0)");
    assert_failure("(divide 1 0.0)");
    assert_failure("(head '())");
}

#[test]
fn runtime_errors_without_analyzer_gating() {
    assert!(matches!(interpret_raw("(plus true 1)"),
                     Err(RuntimeError::ExpectedNumber { .. })));
    assert!(matches!(interpret_raw("someatom"),
                     Err(RuntimeError::UndefinedAtom { .. })));
    assert!(matches!(interpret_raw("(someatom 1)"),
                     Err(RuntimeError::UndefinedFunction { .. })));
    assert!(matches!(interpret_raw("(break)"),
                     Err(RuntimeError::BreakOutsideLoop { .. })));
    assert!(matches!(interpret_raw("(return 1)"),
                     Err(RuntimeError::ReturnOutsideBlock { .. })));
    assert!(matches!(interpret_raw("(cond 1 2)"),
                     Err(RuntimeError::ExpectedBoolean { .. })));
    assert!(matches!(interpret_raw("(setq f (lambda () (break))) (while true (f))"),
                     Err(RuntimeError::BreakOutsideLoop { .. })));
    assert!(matches!(interpret_raw("(func g (x) x) (g 1 2)"),
                     Err(RuntimeError::ArgumentCountMismatch { .. })));
}

#[test]
fn runtime_errors_cite_the_top_level_line() {
    let error = interpret_raw("(setq ok 1)\n(plus true 1)").unwrap_err();
    assert!(matches!(error, RuntimeError::ExpectedNumber { line: 2 }));
}
