//! Identifier interning.
//!
//! Identifiers and keywords show up over and over across a source file
//! (a class name repeated at every `new`, a parameter name repeated at
//! every use). `Name` wraps a `SmolStr`, which keeps short strings inline
//! (no heap allocation) and makes clones cheap; `Interner` additionally
//! deduplicates so two occurrences of the same identifier share storage.

use smol_str::SmolStr;
use std::collections::HashSet;

/// An interned identifier. Cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self(SmolStr::new(s))
    }
}

/// Deduplicates `Name`s so that repeated identifiers don't each carry their
/// own allocation once they outgrow `SmolStr`'s inline capacity.
#[derive(Debug, Default)]
pub struct Interner {
    seen: HashSet<Name>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.seen.get(s) {
            return existing.clone();
        }
        let name = Name::new(s);
        self.seen.insert(name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

// Name and &str compare by str value, so HashSet::get(&str) works via Borrow.
impl std::borrow::Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("Vehicle");
        let b = interner.intern("Vehicle");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_names_stay_distinct() {
        let mut interner = Interner::new();
        let a = interner.intern("Vehicle");
        let b = interner.intern("Engine");
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }
}
