//! Phase 4: semantic analysis (spec §4.4). Walks the AST the parse-tree
//! generator built, opens a nested scope per construct spec §3.5 names a
//! scope kind for, and reports redeclarations.

mod analyzer;
mod error;
mod scope;
mod symbol;
mod table;

pub use analyzer::{analyze, SemanticReport};
pub use error::SemanticError;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{DeclaredType, PrimitiveType, SymbolEntry, VarKind, Visibility};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
