//! Lexical scopes (spec §3.5). Scopes are stored in a flat arena and
//! addressed by [`ScopeId`] rather than linked by owning pointers — the
//! same arena-of-tables shape the spec's design notes call for in place of
//! an owning `parent` reference (spec §9 "Parent links").

use std::collections::HashMap;

use crate::base::{Name, Span};

use super::symbol::SymbolEntry;

/// The kind of lexical construct a scope was opened for (spec §3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Main,
    Function,
    Class,
    If,
    Check,
    Is,
    For,
    While,
    Do,
    Variable,
    FunctionCall,
    Constructor,
    Enum,
    Enumerator,
    External,
}

/// An index into a [`super::table::SymbolTable`]'s scope arena. Cheap to
/// copy, `'static` — unlike a borrowed `&Scope`, a `ScopeId` outlives any
/// particular borrow of the table that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(super) u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub name: Option<Name>,
    pub position: Span,
    pub symbols: HashMap<Name, SymbolEntry>,
    pub parameters: Vec<SymbolEntry>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
}

impl Scope {
    fn new(kind: ScopeKind, name: Option<Name>, position: Span, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            name,
            position,
            symbols: HashMap::new(),
            parameters: Vec::new(),
            parent,
            children: Vec::new(),
        }
    }
}

/// Arena of scopes, rooted at `ScopeId(0)` (the `main` scope).
#[derive(Debug)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new(root_position: Span) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Main, None, root_position, None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub fn enter(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        name: Option<Name>,
        position: Span,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, name, position, Some(parent)));
        self.scopes[parent.index()].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Walks `parent` links from `from` to the root, returning the first
    /// scope whose `symbols` (or, failing that, `parameters`) contains
    /// `name` — the name-resolution invariant of spec §3.5.
    pub fn resolve(&self, from: ScopeId, name: &str) -> Option<(ScopeId, &SymbolEntry)> {
        let mut current = Some(from);
        while let Some(id) = current {
            let scope = self.get(id);
            if let Some(entry) = scope.symbols.get(name) {
                return Some((id, entry));
            }
            if let Some(entry) = scope.parameters.iter().find(|p| p.name.as_str() == name) {
                return Some((id, entry));
            }
            current = scope.parent;
        }
        None
    }

    /// True if `name` is already bound anywhere in `scope`'s chain up to the
    /// root — spec §3.5's key invariant walks exactly this chain for both
    /// lookup and redeclaration: "shadowing is forbidden in this Language",
    /// so a name already visible from an enclosing scope collides here too,
    /// not only a same-scope duplicate.
    pub fn declared_in(&self, scope: ScopeId, name: &str) -> bool {
        self.resolve(scope, name).is_some()
    }
}
