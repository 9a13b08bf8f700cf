use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Keyword, value::core::Value},
};

/// Dispatches a builtin over fully evaluated arguments.
///
/// `eval` is handled by the core evaluator (it needs the current
/// environment); the special forms never reach this function at all.
///
/// # Errors
/// Arity and operand-type violations, `head` of an empty list, and division
/// by zero.
pub fn call(keyword: Keyword, args: &[Value], line: usize) -> EvalResult<Value> {
    match keyword {
        Keyword::Plus | Keyword::Minus | Keyword::Times | Keyword::Divide => {
            let (a, b) = two(keyword, args, line)?;
            arithmetic(keyword, a, b, line)
        },

        Keyword::Less
        | Keyword::Lesseq
        | Keyword::Greater
        | Keyword::Greatereq
        | Keyword::Equal
        | Keyword::Nonequal => {
            let (a, b) = two(keyword, args, line)?;
            comparison(keyword, a, b, line)
        },

        Keyword::And | Keyword::Or | Keyword::Xor => {
            let (a, b) = two(keyword, args, line)?;
            logical(keyword, a.as_bool(line)?, b.as_bool(line)?)
        },
        Keyword::Not => Ok(Value::Bool(!one(keyword, args, line)?.as_bool(line)?)),

        Keyword::Isint => Ok(Value::Bool(one(keyword, args, line)?.is_integer())),
        Keyword::Isreal => Ok(Value::Bool(one(keyword, args, line)?.is_real())),
        Keyword::Isbool => Ok(Value::Bool(one(keyword, args, line)?.is_bool())),
        Keyword::Isnull => Ok(Value::Bool(one(keyword, args, line)?.is_null())),
        Keyword::Isatom => Ok(Value::Bool(one(keyword, args, line)?.is_atom())),
        Keyword::Islist => Ok(Value::Bool(one(keyword, args, line)?.is_list())),

        Keyword::Head => {
            let items = one(keyword, args, line)?.as_list(line)?;
            items.first()
                 .cloned()
                 .ok_or(RuntimeError::HeadOfEmptyList { line })
        },
        Keyword::Tail => {
            let items = one(keyword, args, line)?.as_list(line)?;
            Ok(Value::List(Rc::new(items.iter().skip(1).cloned().collect())))
        },
        Keyword::Cons => {
            let (item, rest) = two(keyword, args, line)?;
            let rest_items = rest.as_list(line)?;
            let mut items = Vec::with_capacity(rest_items.len() + 1);
            items.push(item.clone());
            items.extend(rest_items.iter().cloned());
            Ok(Value::List(Rc::new(items)))
        },

        _ => unreachable!("special forms and 'eval' are dispatched by the evaluator"),
    }
}

/// Arithmetic over two numeric operands.
///
/// Computation happens in real precision; the result re-promotes to an
/// integer exactly when it has no fractional part, the same rule the
/// optimizer applies when folding. A zero divisor is an error for integer
/// and real operands alike.
fn arithmetic(keyword: Keyword, a: &Value, b: &Value, line: usize) -> EvalResult<Value> {
    let x = a.as_number(line)?;
    let y = b.as_number(line)?;

    if keyword == Keyword::Divide && y == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }

    let result = match keyword {
        Keyword::Plus => x + y,
        Keyword::Minus => x - y,
        Keyword::Times => x * y,
        Keyword::Divide => x / y,
        _ => unreachable!("non-arithmetic keyword in arithmetic dispatch"),
    };
    Ok(Value::number(result))
}

/// Ordering and equality over numeric or boolean operands.
///
/// Booleans coerce to `1.0`/`0.0`; the result is always a boolean.
fn comparison(keyword: Keyword, a: &Value, b: &Value, line: usize) -> EvalResult<Value> {
    let x = a.as_coerced_number(line)?;
    let y = b.as_coerced_number(line)?;

    let result = match keyword {
        Keyword::Less => x < y,
        Keyword::Lesseq => x <= y,
        Keyword::Greater => x > y,
        Keyword::Greatereq => x >= y,
        Keyword::Equal => x == y,
        Keyword::Nonequal => x != y,
        _ => unreachable!("non-comparison keyword in comparison dispatch"),
    };
    Ok(Value::Bool(result))
}

fn logical(keyword: Keyword, x: bool, y: bool) -> EvalResult<Value> {
    let result = match keyword {
        Keyword::And => x && y,
        Keyword::Or => x || y,
        Keyword::Xor => x ^ y,
        _ => unreachable!("non-logical keyword in logical dispatch"),
    };
    Ok(Value::Bool(result))
}

/// Requires exactly one argument.
fn one<'a>(keyword: Keyword, args: &'a [Value], line: usize) -> EvalResult<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(RuntimeError::ArgumentCountMismatch { name: keyword.as_str().to_string(),
                                                       line }),
    }
}

/// Requires exactly two arguments.
fn two<'a>(keyword: Keyword, args: &'a [Value], line: usize) -> EvalResult<(&'a Value, &'a Value)> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(RuntimeError::ArgumentCountMismatch { name: keyword.as_str().to_string(),
                                                       line }),
    }
}
