use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Shared handle to a scope.
///
/// Scopes are shared between the activation that runs in them and every
/// function defined inside them, which keeps them alive as closure
/// environments.
pub type ScopeRef = Rc<RefCell<Scope>>;

/// A variable binding with its mutability.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The bound value.
    pub value:   Value,
    /// Whether the binding may be reassigned.
    pub mutable: bool,
}

/// A binding namespace with an optional parent.
///
/// Lookups and assignments that miss in this scope continue in the parent,
/// forming a singly linked chain that ends at the global scope. A name is
/// defined at most once per scope.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
    parent:   Option<ScopeRef>,
}

impl Scope {
    /// Creates a new root scope without a parent.
    #[must_use]
    pub fn root() -> ScopeRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty scope whose lookups fall back to `parent`.
    #[must_use]
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Self { bindings: HashMap::new(),
                                    parent:   Some(Rc::clone(parent)), }))
    }

    /// Creates a new binding in this scope.
    ///
    /// # Errors
    /// Returns `AlreadyDefined` if `name` is already bound in this scope.
    /// Bindings in parent scopes are not considered.
    ///
    /// # Example
    /// ```
    /// use pyrust::interpreter::{evaluator::scope::Scope, value::core::Value};
    ///
    /// let scope = Scope::root();
    /// scope.borrow_mut().define("x", Value::Integer(1), false, 1).unwrap();
    ///
    /// assert!(scope.borrow_mut().define("x", Value::Integer(2), true, 2).is_err());
    /// ```
    pub fn define(&mut self,
                  name: &str,
                  value: Value,
                  mutable: bool,
                  line: usize)
                  -> EvalResult<()> {
        if self.bindings.contains_key(name) {
            return Err(RuntimeError::AlreadyDefined { name: name.to_string(),
                                                      line });
        }
        self.bindings.insert(name.to_string(), Binding { value, mutable });
        Ok(())
    }

    /// Resolves `name` through this scope and its ancestors.
    ///
    /// Returns the nearest binding's value, or `None` if no scope on the
    /// chain binds the name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(name))
    }

    /// Updates the nearest binding of `name` on the chain.
    ///
    /// # Errors
    /// - `ImmutableAssignment` if the nearest binding was declared without
    ///   `mut`.
    /// - `UnknownVariable` if no scope on the chain binds the name.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutable {
                return Err(RuntimeError::ImmutableAssignment { name: name.to_string(),
                                                               line });
            }
            binding.value = value;
            return Ok(());
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value, line),
            None => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                        line }),
        }
    }

    /// Returns the binding of `name` in this scope only.
    #[must_use]
    pub fn local(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Scope::root();
        global.borrow_mut()
              .define("x", Value::Integer(1), false, 1)
              .unwrap();
        let inner = Scope::child(&Scope::child(&global));

        assert_eq!(inner.borrow().lookup("x"), Some(Value::Integer(1)));
        assert_eq!(inner.borrow().lookup("y"), None);
    }

    #[test]
    fn inner_definition_shadows_outer() {
        let global = Scope::root();
        global.borrow_mut()
              .define("x", Value::Integer(1), false, 1)
              .unwrap();
        let inner = Scope::child(&global);
        inner.borrow_mut()
             .define("x", Value::from("inner"), false, 2)
             .unwrap();

        assert_eq!(inner.borrow().lookup("x"), Some(Value::from("inner")));
        assert_eq!(global.borrow().lookup("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn duplicate_definition_in_same_scope() {
        let scope = Scope::root();
        scope.borrow_mut()
             .define("x", Value::Integer(1), true, 1)
             .unwrap();

        assert!(matches!(scope.borrow_mut().define("x", Value::Integer(2), true, 3),
                         Err(RuntimeError::AlreadyDefined { line: 3, .. })));
        assert_eq!(scope.borrow().lookup("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn assign_updates_the_nearest_binding() {
        let global = Scope::root();
        global.borrow_mut()
              .define("n", Value::Integer(1), true, 1)
              .unwrap();
        let inner = Scope::child(&global);

        inner.borrow_mut().assign("n", Value::Integer(5), 2).unwrap();

        assert!(inner.borrow().local("n").is_none());
        assert_eq!(global.borrow().local("n"),
                   Some(&Binding { value:   Value::Integer(5),
                                   mutable: true, }));
    }

    #[test]
    fn assign_respects_immutability() {
        let global = Scope::root();
        global.borrow_mut()
              .define("k", Value::Integer(1), false, 1)
              .unwrap();
        let inner = Scope::child(&global);

        assert!(matches!(inner.borrow_mut().assign("k", Value::Integer(2), 4),
                         Err(RuntimeError::ImmutableAssignment { line: 4, .. })));
        assert_eq!(global.borrow().lookup("k"), Some(Value::Integer(1)));
    }

    #[test]
    fn assign_to_unbound_name() {
        let scope = Scope::root();

        assert!(matches!(scope.borrow_mut().assign("ghost", Value::Bool(true), 7),
                         Err(RuntimeError::UnknownVariable { line: 7, .. })));
    }
}
