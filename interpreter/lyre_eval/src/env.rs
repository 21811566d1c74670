//! Scoped environments.
//!
//! An [`Env`] is a cheap handle (`Rc<RefCell<_>>`) to a bindings table
//! plus an optional parent handle. Handles are single-threaded by
//! construction; the evaluator never shares them across threads. Chains
//! always terminate at exactly one root: the environment holding the
//! builtin table and every top-level `def`inition.
//!
//! Handle semantics are deliberate and narrow:
//!
//! - `Env::clone` copies the *handle* (the call protocol uses this for
//!   the parent back-link, which must reference the live caller scope)
//! - [`Env::deep_copy`] copies the *contents*, binding by binding, which
//!   is what duplicating a lambda value requires

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::RuntimeError;
use crate::value::Value;

/// A handle to one scope on an environment chain.
#[derive(Clone)]
pub struct Env(Rc<RefCell<EnvInner>>);

struct EnvInner {
    bindings: FxHashMap<String, Value>,
    parent: Option<Env>,
}

impl Env {
    /// Create an empty scope with no parent. Lambdas get one of these at
    /// definition time.
    pub fn empty() -> Self {
        Env(Rc::new(RefCell::new(EnvInner {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    /// Create a root environment with the builtin table and the `t` /
    /// `false` constants installed.
    pub fn root() -> Self {
        let env = Env::empty();
        crate::builtins::install(&env);
        env
    }

    /// Look up `name`, delegating to the parent chain on a local miss.
    ///
    /// A hit returns a deep copy of the binding, so the caller owns its
    /// result outright.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(value) = self.0.borrow().bindings.get(name) {
            return Ok(value.clone());
        }
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(parent) => parent.get(name),
            None => Err(RuntimeError::UnboundSymbol {
                name: name.to_owned(),
            }),
        }
    }

    /// Upsert `name` in this scope only. Last write wins.
    pub fn put(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_owned(), value);
    }

    /// Upsert `name` in the root of this chain, however deep the call
    /// site is nested.
    pub fn def(&self, name: &str, value: Value) {
        let mut env = self.clone();
        loop {
            let parent = env.0.borrow().parent.clone();
            match parent {
                Some(parent) => env = parent,
                None => break,
            }
        }
        env.put(name, value);
    }

    /// Rebind the parent back-link. Only the call protocol does this,
    /// and only on a lambda's private environment.
    pub(crate) fn set_parent(&self, parent: &Env) {
        self.0.borrow_mut().parent = Some(parent.clone());
    }

    /// Copy this scope's contents: every binding is deep-copied, the
    /// parent link is copied as a handle (parents are shared scopes, not
    /// owned ones).
    pub fn deep_copy(&self) -> Self {
        let inner = self.0.borrow();
        Env(Rc::new(RefCell::new(EnvInner {
            bindings: inner
                .bindings
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            parent: inner.parent.clone(),
        })))
    }

    /// Whether two handles refer to the same scope.
    pub fn same_scope(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Env")
            .field("bindings", &inner.bindings.len())
            .field("has_parent", &inner.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn child_of(parent: &Env) -> Env {
        let child = Env::empty();
        child.set_parent(parent);
        child
    }

    #[test]
    fn get_finds_local_bindings() {
        let env = Env::empty();
        env.put("x", Value::num(42));
        assert_eq!(env.get("x"), Ok(Value::num(42)));
    }

    #[test]
    fn get_walks_the_parent_chain() {
        let root = Env::empty();
        root.put("x", Value::num(1));
        let child = child_of(&root);
        assert_eq!(child.get("x"), Ok(Value::num(1)));
    }

    #[test]
    fn local_bindings_shadow_parents() {
        let root = Env::empty();
        root.put("x", Value::num(1));
        let child = child_of(&root);
        child.put("x", Value::num(2));
        assert_eq!(child.get("x"), Ok(Value::num(2)));
        assert_eq!(root.get("x"), Ok(Value::num(1)));
    }

    #[test]
    fn missing_names_report_unbound_symbol() {
        let env = Env::empty();
        assert_eq!(
            env.get("nope"),
            Err(RuntimeError::UnboundSymbol {
                name: "nope".to_owned()
            })
        );
    }

    #[test]
    fn put_overwrites_in_place() {
        let env = Env::empty();
        env.put("x", Value::num(1));
        env.put("x", Value::num(2));
        assert_eq!(env.get("x"), Ok(Value::num(2)));
    }

    #[test]
    fn def_lands_in_the_root_from_any_depth() {
        let root = Env::empty();
        let mid = child_of(&root);
        let leaf = child_of(&mid);

        leaf.def("g", Value::num(9));
        assert_eq!(root.get("g"), Ok(Value::num(9)));
        // visible from everywhere on the chain
        assert_eq!(leaf.get("g"), Ok(Value::num(9)));
    }

    #[test]
    fn deep_copy_detaches_bindings_but_shares_the_parent() {
        let root = Env::empty();
        root.put("global", Value::num(1));
        let child = child_of(&root);
        child.put("local", Value::num(2));

        let copy = child.deep_copy();
        copy.put("local", Value::num(3));

        assert_eq!(child.get("local"), Ok(Value::num(2)));
        assert_eq!(copy.get("local"), Ok(Value::num(3)));
        // parent handle is shared, so the copy still sees the root
        assert_eq!(copy.get("global"), Ok(Value::num(1)));
        assert!(!copy.same_scope(&child));
    }

    #[test]
    fn root_installs_the_builtin_table() {
        let root = Env::root();
        assert_eq!(root.get("t"), Ok(Value::Bool(true)));
        assert_eq!(root.get("false"), Ok(Value::Bool(false)));
        assert!(matches!(root.get("head"), Ok(Value::Fun(_))));
    }
}
