//! Sexpr reduction and the closure call protocol.

use std::collections::VecDeque;

use crate::env::Env;
use crate::error::RuntimeError;
use crate::value::{Fun, Lambda, Value};

/// Formal-list sentinel: the remaining arguments of a call are collected
/// into the symbol that follows it.
pub const VARIADIC_MARKER: &str = "&";

/// Reduce `value` to normal form against `env`.
///
/// Symbols resolve through the environment chain; sexprs reduce; every
/// other kind is already in normal form. User-level failures come back as
/// [`Value::Err`] — this function never aborts.
pub fn eval(env: &Env, value: Value) -> Value {
    match value {
        Value::Sym(name) => match env.get(&name) {
            Ok(value) => value,
            Err(error) => Value::Err(error),
        },
        Value::Sexpr(cells) => eval_sexpr(env, cells),
        other => other,
    }
}

/// Reduce an evaluable list.
///
/// Every element is evaluated left to right before anything else
/// happens; the *first* error among the results wins, even when later
/// elements also failed. An empty list is its own normal form, a
/// singleton unwraps, and anything longer must start with a function.
fn eval_sexpr(env: &Env, cells: Vec<Value>) -> Value {
    let mut cells: Vec<Value> = cells.into_iter().map(|cell| eval(env, cell)).collect();

    if let Some(first_err) = cells.iter().position(|cell| matches!(cell, Value::Err(_))) {
        return cells.swap_remove(first_err);
    }

    if cells.is_empty() {
        return Value::Sexpr(cells);
    }
    if cells.len() == 1 {
        return cells.remove(0);
    }

    let head = cells.remove(0);
    match head {
        Value::Fun(fun) => call(env, fun, cells),
        other => Value::Err(RuntimeError::NotAFunction { got: other.kind() }),
    }
}

/// Apply a function value to already-evaluated arguments.
///
/// `caller_env` is the environment active at the call site; builtins
/// receive it directly, and a fully-applied lambda gets it as the parent
/// of its private environment for the duration of the body evaluation.
pub fn call(caller_env: &Env, fun: Fun, args: Vec<Value>) -> Value {
    match fun {
        Fun::Builtin(builtin) => match (builtin.run)(caller_env, args) {
            Ok(value) => value,
            Err(error) => Value::Err(error),
        },
        Fun::Lambda(lambda) => call_lambda(caller_env, *lambda, args),
    }
}

fn call_lambda(caller_env: &Env, mut lambda: Lambda, args: Vec<Value>) -> Value {
    let given = args.len();
    let total = lambda.formals.len();
    let mut args: VecDeque<Value> = args.into();

    while let Some(value) = args.pop_front() {
        if lambda.formals.is_empty() {
            return Value::Err(RuntimeError::TooManyArguments {
                got: given,
                expected: total,
            });
        }
        let formal = lambda.formals.remove(0);

        if formal == VARIADIC_MARKER {
            if lambda.formals.len() != 1 {
                return Value::Err(RuntimeError::MalformedVariadic);
            }
            let rest = lambda.formals.remove(0);
            let mut collected = vec![value];
            collected.extend(args.drain(..));
            lambda.env.put(&rest, Value::Qexpr(collected));
            break;
        }

        lambda.env.put(&formal, value);
    }

    // A trailing bare `&` means zero variadic arguments were supplied:
    // its symbol still gets bound, to the empty list.
    if lambda.formals.first().is_some_and(|f| f == VARIADIC_MARKER) {
        if lambda.formals.len() != 2 {
            return Value::Err(RuntimeError::MalformedVariadic);
        }
        lambda.formals.remove(0);
        let rest = lambda.formals.remove(0);
        lambda.env.put(&rest, Value::Qexpr(Vec::new()));
    }

    if lambda.formals.is_empty() {
        // Fully applied: the parent is rebound to the *calling*
        // environment, not the definition site. Every chain still ends
        // at the single root, so globals and recursion resolve; names
        // from an enclosing lambda's locals resolve through the caller.
        lambda.env.set_parent(caller_env);
        let body = std::mem::take(&mut lambda.body);
        tracing::trace!(formals = total, args = given, "applying lambda body");
        eval(&lambda.env, Value::Sexpr(body))
    } else {
        tracing::debug!(
            bound = given,
            remaining = lambda.formals.len(),
            "partial application"
        );
        Value::Fun(Fun::Lambda(Box::new(lambda)))
    }
}
