//! RAII scope switching.
//!
//! `ScopedInterpreter` swaps the interpreter's current scope and puts the
//! previous one back when dropped, including when evaluation bails out
//! early through `?` or unwinds.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::{LocalScope, Scope};

/// Guard restoring the interpreter's scope on drop.
///
/// Derefs to `Interpreter`, so evaluation goes through the guard as usual.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: LocalScope<Scope>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env = self.saved.clone();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a fresh child of the current scope.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        let child = LocalScope::new(Scope::with_parent(self.env.clone()));
        self.scoped_in(child)
    }

    /// Make `scope` current until the guard drops.
    pub fn scoped_in(&mut self, scope: LocalScope<Scope>) -> ScopedInterpreter<'_> {
        let saved = std::mem::replace(&mut self.env, scope);
        ScopedInterpreter {
            interpreter: self,
            saved,
        }
    }

    /// Run `f` inside a fresh child scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
