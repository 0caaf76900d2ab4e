//! Identifier and string-literal interning.
//!
//! The lexer, parser and evaluator of a session all hold the same
//! `SharedInterner` and keep adding names to it through `&self`.
//! Interned text is leaked and lives for the rest of the process.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Interned text in `Name` order plus the reverse index.
#[derive(Default)]
struct NameTable {
    ids: FxHashMap<&'static str, Name>,
    texts: Vec<&'static str>,
}

impl NameTable {
    fn seeded() -> Self {
        let mut table = NameTable::default();
        table.texts.push("");
        table.ids.insert("", Name::EMPTY);
        table
    }

    fn insert(&mut self, text: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.ids.get(text) {
            return Ok(name);
        }
        let raw = u32::try_from(self.texts.len()).map_err(|_| InternError::Overflow {
            count: self.texts.len(),
        })?;
        let name = Name::from_raw(raw);
        let text: &'static str = Box::leak(Box::from(text));
        self.texts.push(text);
        self.ids.insert(text, name);
        Ok(name)
    }
}

/// The table ran out of `Name` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let InternError::Overflow { count } = self;
        write!(f, "too many distinct names ({count})")
    }
}

impl std::error::Error for InternError {}

/// Maps text to `Copy` names. `Name::EMPTY` is always `""`.
pub struct StringInterner {
    table: RwLock<NameTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(NameTable::seeded()),
        }
    }

    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().ids.get(text) {
            return Ok(name);
        }
        self.table.write().insert(text)
    }

    /// Intern `text`.
    ///
    /// # Panics
    /// After `u32::MAX` distinct strings.
    #[inline]
    pub fn intern(&self, text: &str) -> Name {
        match self.try_intern(text) {
            Ok(name) => name,
            Err(error) => panic!("{error}"),
        }
    }

    /// Text of `name`; names from another interner read as `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let table = self.table.read();
        table.texts.get(name.index()).copied().unwrap_or_default()
    }

    /// Distinct strings held, counting `""`.
    pub fn len(&self) -> usize {
        self.table.read().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to one interner.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

impl fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedInterner").field(&self.len()).finish()
    }
}

#[cfg(test)]
mod tests;
