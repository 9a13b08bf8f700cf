use lisq::{
    RunOptions,
    ast::Node,
    check_source,
    error::{ParseError, SemanticError},
    interpreter::{
        lexer::{Keyword, Token, tokenize},
        optimizer::optimize,
        parser::Parser,
    },
    run_source,
};

fn parse(src: &str) -> Vec<Node> {
    let tokens = tokenize(src);
    let (nodes, diagnostics) = Parser::new(&tokens).parse_program();
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    nodes
}

fn rendered(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(ToString::to_string).collect()
}

#[test]
fn lexer_classifies_atoms() {
    assert_eq!(tokenize("42"), vec![Token::Integer(42)]);
    assert_eq!(tokenize("-7"), vec![Token::Integer(-7)]);
    assert_eq!(tokenize("3.14"), vec![Token::Real(3.14)]);
    assert_eq!(tokenize("2e3"), vec![Token::Real(2000.0)]);
    assert_eq!(tokenize("true"), vec![Token::Bool(true)]);
    assert_eq!(tokenize("null"), vec![Token::Null]);
    assert_eq!(tokenize("setq"), vec![Token::Keyword(Keyword::Setq)]);
    assert_eq!(tokenize("abc"), vec![Token::Identifier("abc".to_string())]);
    assert_eq!(tokenize("x1"), vec![Token::Unknown("x1".to_string())]);
    assert_eq!(tokenize("12."), vec![Token::Unknown("12.".to_string())]);
}

#[test]
fn whole_number_literals_prefer_integer() {
    assert_eq!(tokenize("7"), vec![Token::Integer(7)]);
    assert_eq!(tokenize("7.0"), vec![Token::Real(7.0)]);
    assert_eq!(tokenize("7e0"), vec![Token::Real(7.0)]);
}

#[test]
fn lexer_emits_newline_tokens() {
    assert_eq!(tokenize("1\n2"),
               vec![Token::Integer(1), Token::Newline, Token::Integer(2)]);
}

#[test]
fn lexer_never_fails() {
    assert_eq!(tokenize("@#$"), vec![Token::Unknown("@#$".to_string())]);
}

#[test]
fn quote_mark_desugars() {
    let nodes = parse("'x");
    assert_eq!(rendered(&nodes), vec!["(quote x)"]);

    let nodes = parse("'(1 2)");
    assert_eq!(rendered(&nodes), vec!["(quote (1 2))"]);
}

#[test]
fn keywords_parse_as_atoms_outside_head_position() {
    let nodes = parse("(quote setq)");
    assert_eq!(rendered(&nodes), vec!["(quote setq)"]);
}

#[test]
fn parser_recovers_and_reports_lines() {
    let src = "(setq a 1)\n(plus 1 ??)\n(setq b 2)";
    let tokens = tokenize(src);
    let (nodes, diagnostics) = Parser::new(&tokens).parse_program();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].line, 1);
    assert_eq!(nodes[1].line, 3);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line_number(), 2);
    assert!(matches!(diagnostics[0], ParseError::UnrecognizedLexeme { .. }));
}

#[test]
fn lenient_mode_accepts_unknown_atoms() {
    let tokens = tokenize("(plus 1 ??)");
    let (nodes, diagnostics) = Parser::lenient(&tokens).parse_program();

    assert!(diagnostics.is_empty());
    assert_eq!(rendered(&nodes), vec!["(plus 1 ??)"]);
}

#[test]
fn missing_close_paren_reported_once() {
    let tokens = tokenize("(setq a (plus 1 2");
    let (nodes, diagnostics) = Parser::new(&tokens).parse_program();

    assert!(nodes.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], ParseError::MissingClosingParen { .. }));
}

#[test]
fn stray_close_paren_is_diagnosed() {
    let tokens = tokenize(") 1");
    let (nodes, diagnostics) = Parser::new(&tokens).parse_program();

    assert_eq!(nodes.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], ParseError::UnmatchedClosingParen { .. }));
}

#[test]
fn folds_nested_numeric_expressions() {
    assert_eq!(rendered(&optimize(&parse("(plus 1 (times 2 3))"))), vec!["7"]);
    assert_eq!(rendered(&optimize(&parse("(divide 3 2)"))), vec!["1.5"]);
    assert_eq!(rendered(&optimize(&parse("(less 1 2)"))), vec!["true"]);
    assert_eq!(rendered(&optimize(&parse("(and true false)"))), vec!["false"]);
    assert_eq!(rendered(&optimize(&parse("(not false)"))), vec!["true"]);
}

#[test]
fn folding_applies_the_evaluators_promotion_rule() {
    assert_eq!(rendered(&optimize(&parse("(divide 4 2)"))), vec!["2"]);
    assert_eq!(rendered(&optimize(&parse("(times 1.5 2)"))), vec!["3"]);
    assert_eq!(rendered(&optimize(&parse("(plus 0.25 0.25)"))), vec!["0.5"]);
}

#[test]
fn zero_divisor_left_unfolded() {
    assert_eq!(rendered(&optimize(&parse("(divide 1 0)"))), vec!["(divide 1 0)"]);
    assert_eq!(rendered(&optimize(&parse("(divide 1 0.0)"))), vec!["(divide 1 0.0)"]);
}

#[test]
fn booleans_never_fold_into_arithmetic_or_comparisons() {
    assert_eq!(rendered(&optimize(&parse("(plus true 1)"))), vec!["(plus true 1)"]);
    assert_eq!(rendered(&optimize(&parse("(equal true true)"))),
               vec!["(equal true true)"]);
}

#[test]
fn quoted_structure_is_untouched() {
    assert_eq!(rendered(&optimize(&parse("'(plus 1 2)"))), vec!["(quote (plus 1 2))"]);
    assert_eq!(rendered(&optimize(&parse("(head '(plus 1 2))"))),
               vec!["(head (quote (plus 1 2)))"]);
}

#[test]
fn dead_setq_keeps_side_effects() {
    let optimized = optimize(&parse("(setq unused (plus 1 2))\n(setq kept 1)\nkept"));
    assert_eq!(rendered(&optimized), vec!["3", "(setq kept 1)", "kept"]);
}

#[test]
fn quoted_atoms_count_as_uses() {
    // The quoted name can reach the evaluator again through eval, so the
    // assignment is not dead.
    let optimized = optimize(&parse("(setq x 1)\n(eval '(plus x 1))"));
    assert_eq!(rendered(&optimized),
               vec!["(setq x 1)", "(eval (quote (plus x 1)))"]);
}

#[test]
fn optimizer_is_observationally_transparent() {
    let programs = ["(plus 1 (times 2 3))",
                    "(divide 3 2)",
                    "(setq unused (setq visible 7))\nvisible",
                    "(prog (i) (setq i 0) (while (less i 5) (setq i (plus i (divide 4 2)))) i)",
                    "(setq x 4) (eval '(plus x 1))"];

    for src in programs {
        let plain = run_source(src,
                               &RunOptions { lenient: false,
                                             fold:    false, }).unwrap();
        let folded = run_source(src,
                                &RunOptions { lenient: false,
                                              fold:    true, }).unwrap();
        assert_eq!(plain, folded, "optimizer changed the behavior of {src}");
    }
}

#[test]
fn analyzer_reports_each_misuse() {
    let (_, _, diagnostics) = check_source("(plus 1 true)", false);
    assert!(matches!(diagnostics[0], SemanticError::ArgumentTypeMismatch { .. }));

    let (_, _, diagnostics) = check_source("(plus 1 2 3)", false);
    assert!(matches!(diagnostics[0], SemanticError::ArityMismatch { .. }));

    let (_, _, diagnostics) = check_source("(someatom 1)", false);
    assert!(matches!(diagnostics[0], SemanticError::UnknownCallee { .. }));

    let (_, _, diagnostics) = check_source("(return 1)", false);
    assert!(matches!(diagnostics[0], SemanticError::ReturnOutsideBlock { .. }));

    let (_, _, diagnostics) = check_source("(break)", false);
    assert!(matches!(diagnostics[0], SemanticError::BreakOutsideLoop { .. }));

    let (_, _, diagnostics) = check_source("(while 1 2)", false);
    assert!(matches!(diagnostics[0], SemanticError::ConditionNotBoolean { .. }));

    let (_, _, diagnostics) = check_source("(setq 1 2)", false);
    assert!(matches!(diagnostics[0], SemanticError::MalformedForm { .. }));

    let (_, _, diagnostics) = check_source("(cond true)", false);
    assert!(matches!(diagnostics[0], SemanticError::MalformedForm { .. }));

    let (_, _, diagnostics) = check_source("(plus x 1)", false);
    assert!(matches!(diagnostics[0], SemanticError::UndeclaredIdentifier { .. }));

    let (_, _, diagnostics) = check_source("(and 1 true)", false);
    assert!(matches!(diagnostics[0], SemanticError::ArgumentTypeMismatch { .. }));

    let (_, _, diagnostics) = check_source("(head 3)", false);
    assert!(matches!(diagnostics[0], SemanticError::ArgumentTypeMismatch { .. }));
}

#[test]
fn analyzer_continues_after_errors() {
    let (_, _, diagnostics) = check_source("(break)\n(plus 1 true)\n(return 5)", false);

    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics[0].line_number(), 1);
    assert_eq!(diagnostics[1].line_number(), 2);
    assert_eq!(diagnostics[2].line_number(), 3);
}

#[test]
fn function_visible_to_body_and_later_siblings() {
    let src = "(func fact (n) (cond (lesseq n 1) 1 (times n (fact (minus n 1)))))\n(fact 5)";
    let (_, _, diagnostics) = check_source(src, false);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn user_call_arity_checked() {
    let (_, _, diagnostics) = check_source("(func g (x) x)\n(g 1 2)", false);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0],
                     SemanticError::ArityMismatch { expected: 1, found: 2, .. }));
}

#[test]
fn lambda_call_shape_arity_checked() {
    let (_, _, diagnostics) = check_source("((lambda (x) x) 1 2)", false);
    assert!(matches!(diagnostics[0], SemanticError::ArityMismatch { .. }));
}

#[test]
fn bound_variable_silences_unknown_callee() {
    let (_, _, diagnostics) = check_source("(setq f (lambda (x) x))\n(f 1)", false);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn quote_suppresses_analysis() {
    let (_, _, diagnostics) = check_source("'(undefined thing)", false);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn break_inside_lambda_is_outside_the_loop() {
    let (_, _, diagnostics) = check_source("(while true ((lambda () (break))))", false);
    assert!(matches!(diagnostics[0], SemanticError::BreakOutsideLoop { .. }));
}

#[test]
fn return_allowed_in_prog_and_functions() {
    let (_, _, diagnostics) = check_source("(prog () (return 1))", false);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let (_, _, diagnostics) = check_source("(func f () (return 1))", false);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}
