//! Lexical scopes.
//!
//! A scope holds constants and ordinary bindings and points at its parent.
//! Function calls get a child of the scope the function was defined in;
//! loops and blocks get a child of the current scope. The root scope holds
//! `true`, `false`, `null` and the builtins as constants.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use fck_ir::{Name, VarType};

use crate::Value;

/// Error returned by `Scope::assign`.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignError {
    /// The name is a constant; carries its unchanged value.
    Constant(Value),
    /// Not defined in any enclosing scope.
    Undefined,
}

/// Shared handle to a scope. Closures, child scopes and the interpreter all
/// hold one; cloning shares the scope.
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    pub fn new(scope: T) -> Self {
        LocalScope(Rc::new(RefCell::new(scope)))
    }

    /// Panics if the scope is being mutated.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Panics if the scope is borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalScope({:p})", Rc::as_ptr(&self.0))
    }
}

/// A variable binding and the type it was declared with.
#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    ty: VarType,
}

/// One scope.
#[derive(Default)]
pub struct Scope {
    constants: FxHashMap<Name, Value>,
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Look a name up: local constants, then local bindings, then the parent.
    /// The flag is `true` for constants.
    pub fn get(&self, name: Name) -> Option<(Value, bool)> {
        if let Some(value) = self.constants.get(&name) {
            return Some((value.clone(), true));
        }
        if let Some(binding) = self.bindings.get(&name) {
            return Some((binding.value.clone(), false));
        }
        self.parent.as_ref()?.borrow().get(name)
    }

    /// Declared type of the nearest binding of `name`. Constants count as
    /// `auto`.
    pub fn var_type(&self, name: Name) -> Option<VarType> {
        if self.constants.contains_key(&name) {
            return Some(VarType::Auto);
        }
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.ty);
        }
        self.parent.as_ref()?.borrow().var_type(name)
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn set(&mut self, name: Name, value: Value, ty: VarType) {
        self.bindings.insert(name, Binding { value, ty });
    }

    /// Drop a local binding. Parents and constants are untouched.
    #[inline]
    pub fn remove(&mut self, name: Name) -> Option<Value> {
        self.bindings.remove(&name).map(|binding| binding.value)
    }

    #[inline]
    pub fn set_constant(&mut self, name: Name, value: Value) {
        self.constants.insert(name, value);
    }

    /// Update the nearest scope that already defines `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(constant) = self.constants.get(&name) {
            return Err(AssignError::Constant(constant.clone()));
        }
        if let Some(binding) = self.bindings.get_mut(&name) {
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("constants", &self.constants.len())
            .field("bindings", &self.bindings.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
