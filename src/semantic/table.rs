//! The symbol table built by [`super::analyzer::analyze`]: a thin wrapper
//! around [`ScopeArena`] that also owns the [`Name`] interner so repeated
//! identifiers across the source share storage (spec §3.5).

use crate::base::{Interner, Name, Span};

use super::scope::{Scope, ScopeArena, ScopeId, ScopeKind};
use super::symbol::SymbolEntry;

pub struct SymbolTable {
    arena: ScopeArena,
    interner: Interner,
}

impl SymbolTable {
    pub fn new(root_position: Span) -> Self {
        Self {
            arena: ScopeArena::new(root_position),
            interner: Interner::new(),
        }
    }

    pub fn root(&self) -> ScopeId {
        self.arena.root()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.arena.get(id)
    }

    pub fn scope_count(&self) -> usize {
        self.arena.len()
    }

    pub fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn enter_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        name: Option<Name>,
        position: Span,
    ) -> ScopeId {
        self.arena.enter(parent, kind, name, position)
    }

    pub fn resolve(&self, from: ScopeId, name: &str) -> Option<&SymbolEntry> {
        self.arena.resolve(from, name).map(|(_, entry)| entry)
    }

    /// Inserts `entry` into `scope`'s symbol map. Returns `false` (and
    /// leaves the table unchanged) if `entry.name` is already bound
    /// directly in `scope` — the caller raises a redeclaration diagnostic
    /// in that case.
    pub fn insert(&mut self, scope: ScopeId, entry: SymbolEntry) -> bool {
        if self.arena.declared_in(scope, entry.name.as_str()) {
            tracing::trace!(name = %entry.name, "redeclaration rejected");
            return false;
        }
        self.arena.get_mut(scope).symbols.insert(entry.name.clone(), entry);
        true
    }

    /// Inserts `entry` into `scope`'s ordered `parameters` list. Same
    /// collision rule as [`Self::insert`], checked against the union of
    /// `symbols` and `parameters` in that scope.
    pub fn insert_parameter(&mut self, scope: ScopeId, entry: SymbolEntry) -> bool {
        if self.arena.declared_in(scope, entry.name.as_str()) {
            return false;
        }
        self.arena.get_mut(scope).parameters.push(entry);
        true
    }
}
