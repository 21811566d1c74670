//! Structured runtime errors.
//!
//! Every user-level failure is one of these kinds, carried inside
//! [`crate::Value::Err`] as an ordinary value. The kind holds the
//! interpolated fields; the message text exists only in the `Display`
//! impl, so callers can match on the kind without string parsing.

use std::fmt;

use crate::value::ValueKind;

/// A runtime failure, kept as data until render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    /// A symbol with no binding anywhere on the environment chain.
    UnboundSymbol { name: String },
    /// A builtin called with the wrong number of arguments.
    Arity {
        func: &'static str,
        got: usize,
        expected: usize,
    },
    /// A builtin argument of the wrong kind. `position` is 1-based.
    TypeMismatch {
        func: &'static str,
        position: usize,
        got: ValueKind,
        expected: ValueKind,
    },
    /// `head`/`tail` applied to `{}`.
    EmptyList { func: &'static str },
    /// `/` or `%` with a zero divisor.
    DivisionByZero,
    /// A `&` in a formal list not followed by exactly one symbol.
    MalformedVariadic,
    /// A multi-element sexpr whose head evaluated to a non-function.
    NotAFunction { got: ValueKind },
    /// A definition form given a non-symbol where a name belongs.
    NotASymbol {
        func: &'static str,
        got: ValueKind,
    },
    /// A lambda applied to more arguments than it has formals.
    TooManyArguments { got: usize, expected: usize },
    /// `def`/`=` given a name list and value list of different lengths.
    NameValueMismatch {
        func: &'static str,
        got: usize,
        expected: usize,
    },
    /// A number literal that does not fit a 64-bit integer.
    InvalidNumber,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnboundSymbol { name } => write!(f, "unbound symbol '{name}'!"),
            RuntimeError::Arity {
                func,
                got,
                expected,
            } => write!(
                f,
                "Function '{func}' passed incorrect number of arguments! \
                 Got {got}, expected {expected}."
            ),
            RuntimeError::TypeMismatch {
                func,
                position,
                got,
                expected,
            } => write!(
                f,
                "Function '{func}' passed incorrect type for argument {position}! \
                 Got {got}, expected {expected}."
            ),
            RuntimeError::EmptyList { func } => {
                write!(f, "Function '{func}' passed {{}}!")
            }
            RuntimeError::DivisionByZero => write!(f, "Division by zero!"),
            RuntimeError::MalformedVariadic => write!(
                f,
                "malformed variadic formal: '&' must be followed by a single symbol"
            ),
            RuntimeError::NotAFunction { got } => write!(
                f,
                "S-Expression does not start with function! Got {got}, expected Function."
            ),
            RuntimeError::NotASymbol { func, got } => write!(
                f,
                "Function '{func}' cannot define non-symbol! Got {got}, expected Symbol."
            ),
            RuntimeError::TooManyArguments { got, expected } => {
                write!(f, "too many arguments: got {got}, expected {expected}")
            }
            RuntimeError::NameValueMismatch {
                func,
                got,
                expected,
            } => write!(
                f,
                "Function '{func}' passed mismatched names and values! \
                 Got {got} names, expected {expected}."
            ),
            RuntimeError::InvalidNumber => write!(f, "invalid number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_interpolate_fields() {
        assert_eq!(
            RuntimeError::UnboundSymbol {
                name: "foo".to_owned()
            }
            .to_string(),
            "unbound symbol 'foo'!"
        );
        assert_eq!(RuntimeError::DivisionByZero.to_string(), "Division by zero!");
        assert_eq!(
            RuntimeError::TooManyArguments { got: 5, expected: 2 }.to_string(),
            "too many arguments: got 5, expected 2"
        );
        assert_eq!(
            RuntimeError::TypeMismatch {
                func: "head",
                position: 1,
                got: ValueKind::Number,
                expected: ValueKind::Qexpr,
            }
            .to_string(),
            "Function 'head' passed incorrect type for argument 1! \
             Got Number, expected Q-Expression."
        );
        assert_eq!(
            RuntimeError::EmptyList { func: "tail" }.to_string(),
            "Function 'tail' passed {}!"
        );
    }
}
