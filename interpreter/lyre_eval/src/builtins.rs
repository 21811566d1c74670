//! The primitive library.
//!
//! Every primitive validates positionally — arity first, then argument
//! kinds in order, then value ranges — and returns the first violation
//! it finds, before any effect happens. Dispatch converts an `Err`
//! return into a [`Value::Err`].

use crate::env::Env;
use crate::error::RuntimeError;
use crate::eval::eval;
use crate::value::{Builtin, BuiltinFn, Fun, Lambda, Value, ValueKind};

/// Install the builtin table and the boolean constants into `env`.
///
/// `env` is expected to be a chain root; nothing enforces that, so a
/// caller building nested test scopes can install anywhere.
pub fn install(env: &Env) {
    let table: &[(&'static str, BuiltinFn)] = &[
        // list operations
        ("list", list),
        ("head", head),
        ("tail", tail),
        ("eval", eval_builtin),
        ("join", join),
        ("cons", cons),
        ("len", len),
        // arithmetic
        ("+", add),
        ("-", sub),
        ("*", mul),
        ("/", div),
        ("%", rem),
        ("^", pow),
        // ordering and equality
        (">", gt),
        ("<", lt),
        (">=", ge),
        ("<=", le),
        ("==", eq),
        ("!=", ne),
        // boolean combinators
        ("&&", and),
        ("||", or),
        ("!", not),
        // definition forms
        ("def", def),
        ("=", put),
        ("\\", lambda),
        // control
        ("if", if_),
    ];
    for &(name, run) in table {
        env.put(name, Value::Fun(Fun::Builtin(Builtin { name, run })));
    }

    env.put("t", Value::Bool(true));
    env.put("false", Value::Bool(false));
}

// Validation helpers, applied in LASSERT order: count, then kind per
// position.

fn expect_count(
    func: &'static str,
    args: &[Value],
    expected: usize,
) -> Result<(), RuntimeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::Arity {
            func,
            got: args.len(),
            expected,
        })
    }
}

fn expect_some(func: &'static str, args: &[Value]) -> Result<(), RuntimeError> {
    if args.is_empty() {
        Err(RuntimeError::Arity {
            func,
            got: 0,
            expected: 1,
        })
    } else {
        Ok(())
    }
}

fn type_mismatch(
    func: &'static str,
    index: usize,
    got: &Value,
    expected: ValueKind,
) -> RuntimeError {
    RuntimeError::TypeMismatch {
        func,
        position: index + 1,
        got: got.kind(),
        expected,
    }
}

/// Pull the cells out of a Q-Expression argument at `index` (already
/// removed from the argument list).
fn into_qexpr(
    func: &'static str,
    index: usize,
    value: Value,
) -> Result<Vec<Value>, RuntimeError> {
    match value {
        Value::Qexpr(cells) => Ok(cells),
        other => Err(type_mismatch(func, index, &other, ValueKind::Qexpr)),
    }
}

fn into_bool(func: &'static str, index: usize, value: Value) -> Result<bool, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(type_mismatch(func, index, &other, ValueKind::Boolean)),
    }
}

// List operations

fn list(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    // The call's own argument list, reinterpreted as literal data
    Ok(Value::Qexpr(args))
}

fn head(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("head", &args, 1)?;
    let mut cells = into_qexpr("head", 0, args.remove(0))?;
    if cells.is_empty() {
        return Err(RuntimeError::EmptyList { func: "head" });
    }
    cells.truncate(1);
    Ok(Value::Qexpr(cells))
}

fn tail(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("tail", &args, 1)?;
    let mut cells = into_qexpr("tail", 0, args.remove(0))?;
    if cells.is_empty() {
        return Err(RuntimeError::EmptyList { func: "tail" });
    }
    cells.remove(0);
    Ok(Value::Qexpr(cells))
}

fn eval_builtin(env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("eval", &args, 1)?;
    let cells = into_qexpr("eval", 0, args.remove(0))?;
    Ok(eval(env, Value::Sexpr(cells)))
}

fn join(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_some("join", &args)?;
    for (i, arg) in args.iter().enumerate() {
        if arg.kind() != ValueKind::Qexpr {
            return Err(type_mismatch("join", i, arg, ValueKind::Qexpr));
        }
    }
    let mut out = Vec::new();
    for arg in args {
        if let Value::Qexpr(cells) = arg {
            out.extend(cells);
        }
    }
    Ok(Value::Qexpr(out))
}

fn cons(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("cons", &args, 2)?;
    let front = args.remove(0);
    if front.kind() != ValueKind::Number {
        return Err(type_mismatch("cons", 0, &front, ValueKind::Number));
    }
    let mut cells = into_qexpr("cons", 1, args.remove(0))?;
    cells.insert(0, front);
    Ok(Value::Qexpr(cells))
}

fn len(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("len", &args, 1)?;
    let cells = into_qexpr("len", 0, args.remove(0))?;
    Ok(Value::num(i64::try_from(cells.len()).unwrap_or(i64::MAX)))
}

// Arithmetic: a left fold from the first argument, on wrapping 64-bit
// integers so no input can panic the evaluator.

#[derive(Clone, Copy)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl ArithOp {
    fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
            ArithOp::Pow => "^",
        }
    }

    fn apply(self, acc: i64, n: i64) -> Result<i64, RuntimeError> {
        match self {
            ArithOp::Add => Ok(acc.wrapping_add(n)),
            ArithOp::Sub => Ok(acc.wrapping_sub(n)),
            ArithOp::Mul => Ok(acc.wrapping_mul(n)),
            ArithOp::Div => {
                if n == 0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(acc.wrapping_div(n))
                }
            }
            ArithOp::Rem => {
                if n == 0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(acc.wrapping_rem(n))
                }
            }
            ArithOp::Pow => Ok(int_pow(acc, n)),
        }
    }
}

/// Integer exponentiation. Negative exponents truncate toward zero the
/// way the floating-point original did: only bases `1` and `-1` survive.
fn int_pow(base: i64, exp: i64) -> i64 {
    if exp >= 0 {
        let exp = u32::try_from(exp).unwrap_or(u32::MAX);
        base.wrapping_pow(exp)
    } else {
        match base {
            1 => 1,
            -1 => {
                if exp % 2 == 0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        }
    }
}

fn arith(op: ArithOp, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let func = op.name();
    expect_some(func, &args)?;
    let mut nums = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::Num(n) => nums.push(*n),
            other => return Err(type_mismatch(func, i, other, ValueKind::Number)),
        }
    }

    let mut iter = nums.into_iter();
    let mut acc = iter.next().unwrap_or(0);

    // A lone operand negates under `-`
    if iter.len() == 0 && matches!(op, ArithOp::Sub) {
        return Ok(Value::num(acc.wrapping_neg()));
    }
    for n in iter {
        acc = op.apply(acc, n)?;
    }
    Ok(Value::num(acc))
}

fn add(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Add, args)
}

fn sub(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Sub, args)
}

fn mul(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Mul, args)
}

fn div(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Div, args)
}

fn rem(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Rem, args)
}

fn pow(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    arith(ArithOp::Pow, args)
}

// Ordering

#[derive(Clone, Copy)]
enum OrdOp {
    Gt,
    Lt,
    Ge,
    Le,
}

impl OrdOp {
    fn name(self) -> &'static str {
        match self {
            OrdOp::Gt => ">",
            OrdOp::Lt => "<",
            OrdOp::Ge => ">=",
            OrdOp::Le => "<=",
        }
    }

    fn holds(self, a: i64, b: i64) -> bool {
        match self {
            OrdOp::Gt => a > b,
            OrdOp::Lt => a < b,
            OrdOp::Ge => a >= b,
            OrdOp::Le => a <= b,
        }
    }
}

fn ord(op: OrdOp, args: &[Value]) -> Result<Value, RuntimeError> {
    let func = op.name();
    expect_count(func, args, 2)?;
    let mut pair = [0i64; 2];
    for (i, slot) in pair.iter_mut().enumerate() {
        match &args[i] {
            Value::Num(n) => *slot = *n,
            other => return Err(type_mismatch(func, i, other, ValueKind::Number)),
        }
    }
    Ok(Value::Bool(op.holds(pair[0], pair[1])))
}

fn gt(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    ord(OrdOp::Gt, &args)
}

fn lt(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    ord(OrdOp::Lt, &args)
}

fn ge(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    ord(OrdOp::Ge, &args)
}

fn le(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    ord(OrdOp::Le, &args)
}

// Equality: deep structural comparison over any two kinds

fn eq(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("==", &args, 2)?;
    Ok(Value::Bool(args[0] == args[1]))
}

fn ne(_env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("!=", &args, 2)?;
    Ok(Value::Bool(args[0] != args[1]))
}

// Boolean combinators

fn and(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("&&", &args, 2)?;
    let a = into_bool("&&", 0, args.remove(0))?;
    let b = into_bool("&&", 1, args.remove(0))?;
    Ok(Value::Bool(a && b))
}

fn or(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("||", &args, 2)?;
    let a = into_bool("||", 0, args.remove(0))?;
    let b = into_bool("||", 1, args.remove(0))?;
    Ok(Value::Bool(a || b))
}

fn not(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("!", &args, 1)?;
    let a = into_bool("!", 0, args.remove(0))?;
    Ok(Value::Bool(!a))
}

// Control

fn if_(env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("if", &args, 3)?;
    let cond = into_bool("if", 0, args.remove(0))?;
    let consequent = into_qexpr("if", 1, args.remove(0))?;
    let alternative = into_qexpr("if", 2, args.remove(0))?;

    // Only the chosen branch is ever tagged evaluable; the other one is
    // dropped untouched, errors and all.
    let chosen = if cond { consequent } else { alternative };
    Ok(eval(env, Value::Sexpr(chosen)))
}

// Definition forms

#[derive(Clone, Copy)]
enum DefScope {
    /// Bind at the chain root, wherever the call site sits.
    Global,
    /// Bind in the environment active at the call site.
    Local,
}

fn define(
    func: &'static str,
    scope: DefScope,
    env: &Env,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    expect_some(func, &args)?;
    let names = into_qexpr(func, 0, args.remove(0))?;

    let mut symbols = Vec::with_capacity(names.len());
    for name in &names {
        match name {
            Value::Sym(s) => symbols.push(s.clone()),
            other => {
                return Err(RuntimeError::NotASymbol {
                    func,
                    got: other.kind(),
                })
            }
        }
    }

    if symbols.len() != args.len() {
        return Err(RuntimeError::NameValueMismatch {
            func,
            got: symbols.len(),
            expected: args.len(),
        });
    }

    for (name, value) in symbols.into_iter().zip(args) {
        match scope {
            DefScope::Global => env.def(&name, value),
            DefScope::Local => env.put(&name, value),
        }
    }
    Ok(Value::unit())
}

fn def(env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    define("def", DefScope::Global, env, args)
}

fn put(env: &Env, args: Vec<Value>) -> Result<Value, RuntimeError> {
    define("=", DefScope::Local, env, args)
}

fn lambda(_env: &Env, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_count("\\", &args, 2)?;
    let formal_cells = into_qexpr("\\", 0, args.remove(0))?;
    let body = into_qexpr("\\", 1, args.remove(0))?;

    let mut formals = Vec::with_capacity(formal_cells.len());
    for cell in &formal_cells {
        match cell {
            Value::Sym(s) => formals.push(s.clone()),
            other => {
                return Err(RuntimeError::NotASymbol {
                    func: "\\",
                    got: other.kind(),
                })
            }
        }
    }

    Ok(Value::Fun(Fun::Lambda(Box::new(Lambda {
        env: Env::empty(),
        formals,
        body,
    }))))
}
