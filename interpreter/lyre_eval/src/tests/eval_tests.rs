//! Evaluator and arithmetic behavior over real source.

use pretty_assertions::assert_eq;

use super::{eval_last, render_last};
use crate::{eval, read, Env, RuntimeError, Value, ValueKind};

#[test]
fn addition_folds_left_to_right() {
    assert_eq!(eval_last("(+ 2 3 4)"), Value::num(9));
    assert_eq!(eval_last("(+ 5)"), Value::num(5));
}

#[test]
fn lone_minus_operand_negates() {
    assert_eq!(eval_last("(- 5)"), Value::num(-5));
    assert_eq!(eval_last("(- 10 2 3)"), Value::num(5));
}

#[test]
fn multiplication_and_subtraction_chain() {
    assert_eq!(eval_last("(* 3 4 5)"), Value::num(60));
    assert_eq!(eval_last("(+ 1 (* 2 3))"), Value::num(7));
}

#[test]
fn division_by_zero_is_an_error_value() {
    assert_eq!(render_last("(/ 5 0)"), "Error: Division by zero!");
    assert_eq!(render_last("(% 7 0)"), "Error: Division by zero!");
    assert_eq!(eval_last("(/ 10 3)"), Value::num(3));
    assert_eq!(eval_last("(% 7 3)"), Value::num(1));
}

#[test]
fn exponentiation_is_integral() {
    assert_eq!(eval_last("(^ 2 10)"), Value::num(1024));
    assert_eq!(eval_last("(^ -2 3)"), Value::num(-8));
    assert_eq!(eval_last("(^ 5 0)"), Value::num(1));
}

#[test]
fn arithmetic_rejects_non_numbers_positionally() {
    assert_eq!(
        eval_last("(+ 1 {})"),
        Value::err(RuntimeError::TypeMismatch {
            func: "+",
            position: 2,
            got: ValueKind::Qexpr,
            expected: ValueKind::Number,
        })
    );
}

#[test]
fn type_violations_outrank_value_range_violations() {
    // The zero divisor would fire during the fold, but the kind scan
    // over all operands happens first.
    assert_eq!(
        eval_last("(/ 1 {} 0)"),
        Value::err(RuntimeError::TypeMismatch {
            func: "/",
            position: 2,
            got: ValueKind::Qexpr,
            expected: ValueKind::Number,
        })
    );
}

#[test]
fn first_error_in_a_list_wins() {
    // Both the division and the unbound symbol fail; the earlier element
    // is the result.
    assert_eq!(render_last("(+ (/ 1 0) nope)"), "Error: Division by zero!");
    assert_eq!(
        render_last("(+ 1 nope (/ 1 0))"),
        "Error: unbound symbol 'nope'!"
    );
}

#[test]
fn untaken_branches_never_evaluate() {
    assert_eq!(eval_last("(if t {1} {(/ 1 0)})"), Value::num(1));
    assert_eq!(eval_last("(if false {(/ 1 0)} {2})"), Value::num(2));
}

#[test]
fn quoted_lists_are_inert() {
    assert_eq!(
        eval_last("{+ 1 nope}"),
        Value::qexpr(vec![Value::sym("+"), Value::num(1), Value::sym("nope")])
    );
}

#[test]
fn empty_and_singleton_sexprs() {
    assert_eq!(eval_last("()"), Value::unit());
    assert_eq!(eval_last("(5)"), Value::num(5));
}

#[test]
fn non_function_head_is_rejected() {
    assert_eq!(
        eval_last("(1 2)"),
        Value::err(RuntimeError::NotAFunction {
            got: ValueKind::Number
        })
    );
}

#[test]
fn whole_line_reads_as_one_application() {
    // REPL semantics: the unlabeled root is itself an evaluable list.
    let env = Env::root();
    let tree = lyre_parse::parse("+ 1 2").expect("parse");
    assert_eq!(eval(&env, read(&tree)), Value::num(3));
}

#[test]
fn boolean_constants_are_plain_globals() {
    assert_eq!(eval_last("t"), Value::Bool(true));
    assert_eq!(eval_last("false"), Value::Bool(false));
    // re-assignable like any other global
    assert_eq!(eval_last("(def {t} 5) t"), Value::num(5));
}

#[test]
fn independent_roots_share_nothing() {
    let a = Env::root();
    let b = Env::root();
    super::eval_statements(&a, "(def {x} 1)");
    assert_eq!(
        super::eval_statements(&b, "x").pop(),
        Some(Value::err(RuntimeError::UnboundSymbol {
            name: "x".to_owned()
        }))
    );
}
