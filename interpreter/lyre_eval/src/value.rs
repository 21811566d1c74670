//! Runtime values.
//!
//! A [`Value`] is a closed sum of exactly seven kinds. The tree is
//! exclusively owned at every node: there is no aliasing of sub-lists, and
//! duplicating a value is a deep copy. The one place `Clone` cannot be
//! derived is [`Lambda`]: copying a function value copies its private
//! environment element by element, so two copies never share bindings.

use std::fmt;

use crate::env::Env;
use crate::error::RuntimeError;

/// Signature of a primitive operation.
///
/// Primitives receive the environment active at the call site (so `def`
/// and `=` can reach the chain) and own their argument list. A failure
/// return is converted into a [`Value::Err`] by the caller.
pub type BuiltinFn = fn(&Env, Vec<Value>) -> Result<Value, RuntimeError>;

/// A named reference to a primitive operation.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub run: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    /// Builtins compare by identity. Names are unique in the builtin
    /// table, so the name stands in for the primitive reference.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A user-defined function value.
///
/// `formals` may end with the variadic marker `&` followed by one name.
/// `body` is the element sequence of the body expression; it is tagged as
/// a sexpr only when the call protocol evaluates it. `env` holds the
/// formals bound so far and is exclusively owned by this lambda.
#[derive(Debug)]
pub struct Lambda {
    pub env: Env,
    pub formals: Vec<String>,
    pub body: Vec<Value>,
}

impl PartialEq for Lambda {
    /// Lambdas compare structurally by formals and body; the bound
    /// environment is excluded.
    fn eq(&self, other: &Self) -> bool {
        self.formals == other.formals && self.body == other.body
    }
}

impl Clone for Lambda {
    fn clone(&self) -> Self {
        Lambda {
            env: self.env.deep_copy(),
            formals: self.formals.clone(),
            body: self.body.clone(),
        }
    }
}

/// A callable value: primitive or user-defined.
#[derive(Clone, Debug, PartialEq)]
pub enum Fun {
    Builtin(Builtin),
    Lambda(Box<Lambda>),
}

/// Runtime value in the Lyre evaluator.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// 64-bit integer.
    Num(i64),
    /// Boolean, rendered `t` / `false`.
    Bool(bool),
    /// First-class error value.
    Err(RuntimeError),
    /// Symbol, resolved against the environment chain when evaluated.
    Sym(String),
    /// Evaluable list.
    Sexpr(Vec<Value>),
    /// Quoted list: literal data, never auto-evaluated.
    Qexpr(Vec<Value>),
    /// Function value.
    Fun(Fun),
}

/// The kind of a [`Value`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Boolean,
    Error,
    Symbol,
    Sexpr,
    Qexpr,
    Function,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "Number",
            ValueKind::Boolean => "Boolean",
            ValueKind::Error => "Error",
            ValueKind::Symbol => "Symbol",
            ValueKind::Sexpr => "S-Expression",
            ValueKind::Qexpr => "Q-Expression",
            ValueKind::Function => "Function",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a number value.
    pub fn num(n: i64) -> Self {
        Value::Num(n)
    }

    /// Create a symbol value.
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    /// Create an evaluable list.
    pub fn sexpr(cells: Vec<Value>) -> Self {
        Value::Sexpr(cells)
    }

    /// Create a quoted list.
    pub fn qexpr(cells: Vec<Value>) -> Self {
        Value::Qexpr(cells)
    }

    /// Create an error value.
    pub fn err(error: RuntimeError) -> Self {
        Value::Err(error)
    }

    /// The empty sexpr `()`, the result of definition forms.
    pub fn unit() -> Self {
        Value::Sexpr(Vec::new())
    }

    /// The kind of this value, for diagnostics.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Num(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Err(_) => ValueKind::Error,
            Value::Sym(_) => ValueKind::Symbol,
            Value::Sexpr(_) => ValueKind::Sexpr,
            Value::Qexpr(_) => ValueKind::Qexpr,
            Value::Fun(_) => ValueKind::Function,
        }
    }

    /// Render to text; same output as `Display`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<RuntimeError> for Value {
    fn from(error: RuntimeError) -> Self {
        Value::Err(error)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, cells: &[Value]) -> fmt::Result {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{cell}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Bool(true) => f.write_str("t"),
            Value::Bool(false) => f.write_str("false"),
            Value::Err(error) => write!(f, "Error: {error}"),
            Value::Sym(name) => f.write_str(name),
            Value::Sexpr(cells) => {
                f.write_str("(")?;
                write_joined(f, cells)?;
                f.write_str(")")
            }
            Value::Qexpr(cells) => {
                f.write_str("{")?;
                write_joined(f, cells)?;
                f.write_str("}")
            }
            Value::Fun(Fun::Builtin(_)) => f.write_str("<function>"),
            Value::Fun(Fun::Lambda(lambda)) => {
                f.write_str("(\\ {")?;
                for (i, formal) in lambda.formals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(formal)?;
                }
                f.write_str("} {")?;
                write_joined(f, &lambda.body)?;
                f.write_str("})")
            }
        }
    }
}
