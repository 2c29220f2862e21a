use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, Function},
    interpreter::evaluator::{
        core::{Context, EvalResult},
        function::core::register_builtins,
    },
};

/// A lexical scope mapping identifiers to expressions.
///
/// Scopes form a parent-linked chain ending at the global scope. The parser
/// resolves every identifier against this chain when it reads it, so
/// evaluation never looks names up again.
///
/// A lambda's parameters live in a child scope whose depth is the lambda's
/// lexical depth; the global scope has depth 0.
#[derive(Debug)]
pub struct Scope {
    bindings: RefCell<HashMap<String, Expr>>,
    parent:   Option<Rc<Self>>,
    depth:    usize,
}

impl Scope {
    /// Creates an empty global scope.
    #[must_use]
    pub fn new_global() -> Rc<Self> {
        Rc::new(Self { bindings: RefCell::new(HashMap::new()),
                       parent:   None,
                       depth:    0, })
    }

    /// Creates a global scope holding the standard library.
    ///
    /// # Example
    /// ```
    /// use morgana::interpreter::scope::Scope;
    ///
    /// let scope = Scope::with_builtins();
    /// assert!(scope.lookup("map").is_some());
    /// assert!(scope.lookup("frobnicate").is_none());
    /// ```
    #[must_use]
    pub fn with_builtins() -> Rc<Self> {
        let scope = Self::new_global();
        register_builtins(&scope);
        scope
    }

    /// Creates a scope nested one level deeper than `parent`.
    #[must_use]
    pub fn child(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { bindings: RefCell::new(HashMap::new()),
                       parent:   Some(Rc::clone(parent)),
                       depth:    parent.depth + 1, })
    }

    /// Nesting depth; 0 for the global scope.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Looks `name` up in this scope and then outward to the global scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Expr> {
        if let Some(expr) = self.bindings.borrow().get(name) {
            return Some(expr.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: &str, expr: Expr) {
        self.bindings.borrow_mut().insert(name.to_string(), expr);
    }

    /// Binds `name` in the global scope, whatever scope it is called on.
    pub fn set_global(&self, name: &str, expr: Expr) {
        match &self.parent {
            Some(parent) => parent.set_global(name, expr),
            None => self.define(name, expr),
        }
    }

    /// Registers a native function under `name` in the global scope.
    ///
    /// The implementation runs once `arity` arguments have been supplied;
    /// before that the function is partially applied. This is how an
    /// embedding application exposes its own values and functions.
    ///
    /// # Parameters
    /// - `name`: Identifier the function is bound to.
    /// - `arity`: Number of arguments collected before `implementation` runs.
    /// - `implementation`: Receives the context and the evaluated arguments.
    ///
    /// # Example
    /// ```
    /// use morgana::{ast::Expr, interpreter::scope::Scope, parse_with, evaluate};
    ///
    /// let scope = Scope::with_builtins();
    /// scope.register_function("double", 1, |_, args| {
    ///          Ok(Expr::Integer(args[0].as_integer()? * 2))
    ///      });
    ///
    /// let expr = parse_with("double 21", &scope).unwrap();
    /// assert_eq!(evaluate(&expr, &[]).unwrap().to_string(), "42");
    /// ```
    pub fn register_function<F>(&self, name: &str, arity: usize, implementation: F)
        where F: Fn(&Context, &[Expr]) -> EvalResult<Expr> + 'static
    {
        let function = Function { name: name.to_string(),
                                  arity,
                                  implementation: Rc::new(implementation) };
        self.set_global(name, Expr::Function(Rc::new(function)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Scope::new_global();
        global.define("a", Expr::Integer(1));
        let inner = Scope::child(&Scope::child(&global));

        assert_eq!(inner.depth(), 2);
        assert_eq!(inner.lookup("a").map(|e| e.to_string()), Some("1".to_string()));
        assert!(inner.lookup("b").is_none());
    }

    #[test]
    fn inner_bindings_shadow_outer_ones() {
        let global = Scope::new_global();
        global.define("a", Expr::Integer(1));
        let inner = Scope::child(&global);
        inner.define("a", Expr::Integer(2));

        assert_eq!(inner.lookup("a").map(|e| e.to_string()), Some("2".to_string()));
        assert_eq!(global.lookup("a").map(|e| e.to_string()), Some("1".to_string()));
    }

    #[test]
    fn set_global_lands_in_the_root() {
        let global = Scope::new_global();
        let middle = Scope::child(&global);
        let inner = Scope::child(&middle);
        inner.set_global("g", Expr::Bool(true));

        assert!(global.lookup("g").is_some());
        assert!(middle.bindings.borrow().get("g").is_none());
        assert!(inner.bindings.borrow().get("g").is_none());
        assert!(Scope::child(&global).lookup("g").is_some());
    }

    #[test]
    fn registered_functions_are_global() {
        let global = Scope::with_builtins();
        let inner = Scope::child(&global);
        inner.register_function("seven", 0, |_, _| Ok(Expr::Integer(7)));

        assert!(matches!(global.lookup("seven"), Some(Expr::Function(f)) if f.arity == 0));
    }
}
