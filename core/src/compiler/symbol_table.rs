//! Name resolution for global bindings.

use hashbrown::HashMap;

/// A resolved binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub index: usize,
}

/// Maps binding names to global slot indices.
///
/// Indices are handed out in definition order. Defining a name again
/// allocates a fresh slot; later lookups see the newest one.
#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    store: HashMap<&'a str, Symbol<'a>>,
    num_definitions: usize,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &'a str) -> Symbol<'a> {
        let symbol = Symbol {
            name,
            index: self.num_definitions,
        };
        self.store.insert(name, symbol);
        self.num_definitions += 1;
        symbol
    }

    pub fn resolve(&self, name: &str) -> Option<Symbol<'a>> {
        self.store.get(name).copied()
    }

    /// Number of slots allocated so far.
    pub fn len(&self) -> usize {
        self.num_definitions
    }

    pub fn is_empty(&self) -> bool {
        self.num_definitions == 0
    }
}
