use std::collections::HashSet;

use crate::{
    ast::{Element, Node},
    interpreter::lexer::Keyword,
    util::num::i64_to_f64_checked,
};

/// Rewrites a program without changing its meaning.
///
/// Two passes run in order: bottom-up constant folding, then a
/// program-wide dead-store rewrite of top-level `setq` forms whose target
/// is never read. Both are required to be observationally transparent —
/// for every program `p`, interpreting `optimize(p)` must produce the same
/// values, the same errors and the same side-effect ordering as
/// interpreting `p`.
///
/// ## Example
/// ```
/// use lisq::interpreter::{lexer::tokenize, optimizer::optimize, parser::Parser};
///
/// let tokens = tokenize("(plus 1 (times 2 3))");
/// let (nodes, _) = Parser::new(&tokens).parse_program();
///
/// let folded = optimize(&nodes);
/// assert_eq!(folded[0].to_string(), "7");
/// ```
#[must_use]
pub fn optimize(nodes: &[Node]) -> Vec<Node> {
    let folded = nodes.iter()
                      .map(|node| Node::new(fold_element(&node.element), node.line))
                      .collect();
    eliminate_dead_stores(folded)
}

/// Folds constant subexpressions bottom-up.
///
/// Quoted structure is data and is returned untouched; folding inside it
/// would change what `head`, `tail` or `eval` later see.
fn fold_element(element: &Element) -> Element {
    let Element::List(items) = element else {
        return element.clone();
    };
    let Some((head, args)) = items.split_first() else {
        return element.clone();
    };

    let keyword = head.as_atom().and_then(Keyword::from_name);
    if keyword == Some(Keyword::Quote) {
        return element.clone();
    }

    let folded_args: Vec<Element> = args.iter().map(fold_element).collect();
    if let Some(keyword) = keyword
       && let Some(folded) = fold_call(keyword, &folded_args)
    {
        return folded;
    }

    let folded_head = if keyword.is_some() {
        head.clone()
    } else {
        fold_element(head)
    };

    let mut folded_items = Vec::with_capacity(items.len());
    folded_items.push(folded_head);
    folded_items.extend(folded_args);
    Element::List(folded_items)
}

/// Computes a literal replacement for a builtin call over literal operands,
/// or `None` when the call must be left for the evaluator.
///
/// Arithmetic and comparisons fold over numeric literals only; booleans are
/// never folded into arithmetic, since at run time they would be a type
/// error there. Division by a literal zero is left unfolded and deferred to
/// the runtime error path. Results re-promote to integers by the same rule
/// the evaluator uses.
fn fold_call(keyword: Keyword, args: &[Element]) -> Option<Element> {
    match keyword {
        Keyword::Plus | Keyword::Minus | Keyword::Times | Keyword::Divide => {
            let [a, b] = args else { return None };
            let x = numeric_literal(a)?;
            let y = numeric_literal(b)?;
            if keyword == Keyword::Divide && y == 0.0 {
                return None;
            }

            let result = match keyword {
                Keyword::Plus => x + y,
                Keyword::Minus => x - y,
                Keyword::Times => x * y,
                Keyword::Divide => x / y,
                _ => return None,
            };
            Some(Element::number(result))
        },

        Keyword::Less
        | Keyword::Lesseq
        | Keyword::Greater
        | Keyword::Greatereq
        | Keyword::Equal
        | Keyword::Nonequal => {
            let [a, b] = args else { return None };
            let x = numeric_literal(a)?;
            let y = numeric_literal(b)?;

            let result = match keyword {
                Keyword::Less => x < y,
                Keyword::Lesseq => x <= y,
                Keyword::Greater => x > y,
                Keyword::Greatereq => x >= y,
                Keyword::Equal => x == y,
                Keyword::Nonequal => x != y,
                _ => return None,
            };
            Some(Element::Bool(result))
        },

        Keyword::And | Keyword::Or | Keyword::Xor => {
            let [Element::Bool(x), Element::Bool(y)] = args else {
                return None;
            };
            let result = match keyword {
                Keyword::And => *x && *y,
                Keyword::Or => *x || *y,
                Keyword::Xor => *x ^ *y,
                _ => return None,
            };
            Some(Element::Bool(result))
        },

        Keyword::Not => {
            let [Element::Bool(x)] = args else { return None };
            Some(Element::Bool(!x))
        },

        _ => None,
    }
}

/// The numeric payload of an integer or real literal.
fn numeric_literal(element: &Element) -> Option<f64> {
    match element {
        Element::Integer(n) => i64_to_f64_checked(*n, ()).ok(),
        Element::Real(r) => Some(*r),
        _ => None,
    }
}

/// Rewrites top-level `setq` forms whose target is declared but never read.
///
/// The assignment disappears but its right-hand side is kept as the
/// top-level form, so side effects in the value expression are preserved.
/// Atoms inside quoted structure count as reads: `eval` can feed quoted
/// data back to the evaluator.
fn eliminate_dead_stores(nodes: Vec<Node>) -> Vec<Node> {
    let mut declared = HashSet::new();
    for node in &nodes {
        if let Some((name, _)) = setq_parts(&node.element) {
            declared.insert(name.to_string());
        }
    }

    let mut used = HashSet::new();
    for node in &nodes {
        collect_used(&node.element, &mut used);
    }

    nodes.into_iter()
         .map(|node| {
             let rewrite = match setq_parts(&node.element) {
                 Some((name, value)) if declared.contains(name) && !used.contains(name) => {
                     Some(Node::new(value.clone(), node.line))
                 },
                 _ => None,
             };
             rewrite.unwrap_or(node)
         })
         .collect()
}

/// Splits a `(setq name value)` form into its parts.
fn setq_parts(element: &Element) -> Option<(&str, &Element)> {
    let items = element.items()?;
    let [head, target, value] = items else {
        return None;
    };
    if head.as_atom().and_then(Keyword::from_name) != Some(Keyword::Setq) {
        return None;
    }
    Some((target.as_atom()?, value))
}

/// Records every atom reference outside the target position of a `setq`.
fn collect_used(element: &Element, used: &mut HashSet<String>) {
    match element {
        Element::Atom(name) => {
            used.insert(name.clone());
        },
        Element::List(items) => {
            if let Some((_, value)) = setq_parts(element) {
                collect_used(value, used);
                return;
            }
            for item in items {
                collect_used(item, used);
            }
        },
        _ => {},
    }
}
