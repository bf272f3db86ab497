//! Semantic-layer value types attached to a declaration (spec §3.4, §3.5).

use crate::base::{Name, Span};

use super::scope::ScopeKind;

/// Visibility modifier on a declaration. Absent modifier means `Global`
/// (spec §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Global,
    Secure,
    Private,
}

impl Visibility {
    /// Classifies a modifier keyword's lexeme; anything else falls back to
    /// the default (absent-modifier) visibility.
    pub fn from_modifier_text(text: &str) -> Self {
        match text {
            "secure" => Self::Secure,
            "private" => Self::Private,
            _ => Self::Global,
        }
    }
}

/// Shape of a variable declaration (spec §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Normal,
    Array,
    Conditional,
    ClassInstance,
}

/// The eight primitive type names the Language recognizes (spec §3.4); any
/// other type name is `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Double,
    Float,
    Char,
    Boolean,
    String,
    Short,
    Long,
}

impl PrimitiveType {
    pub fn from_name(text: &str) -> Option<Self> {
        Some(match text {
            "int" => Self::Int,
            "double" => Self::Double,
            "float" => Self::Float,
            "char" => Self::Char,
            "boolean" => Self::Boolean,
            "String" => Self::String,
            "short" => Self::Short,
            "long" => Self::Long,
            _ => return None,
        })
    }
}

/// A declaration's resolved type (spec §3.4's primitive/custom split).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Primitive(PrimitiveType),
    Custom(Name),
}

impl DeclaredType {
    /// Resolves a `var-type` node's lexeme, or `Custom` with an empty name
    /// when no type annotation was present (spec §8 scenario 1: an
    /// unannotated declaration is typed `custom`, not left absent).
    pub fn from_type_name(text: &str) -> Self {
        match PrimitiveType::from_name(text) {
            Some(p) => Self::Primitive(p),
            None => Self::Custom(Name::new(text)),
        }
    }
}

/// One binding recorded in a [`super::table::SymbolTable`] scope (spec
/// §3.5). Does not borrow the declaring AST node — the span plus the
/// captured text fields are everything a redeclaration check or a
/// diagnostic render needs, and owning the entry outright keeps the table
/// independent of the AST's lifetime once semantic analysis hands both
/// back to the caller.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: Name,
    pub literal_value: Option<String>,
    pub declared_type: DeclaredType,
    pub dimension: u32,
    pub class_type: Option<Name>,
    pub var_kind: VarKind,
    pub is_const: bool,
    pub visibility: Visibility,
    /// The kind of scope this symbol was declared directly within.
    pub scope_kind: ScopeKind,
    pub position: Span,
}

impl SymbolEntry {
    pub fn new(name: impl Into<Name>, declared_type: DeclaredType, position: Span) -> Self {
        Self {
            name: name.into(),
            literal_value: None,
            declared_type,
            dimension: 0,
            class_type: None,
            var_kind: VarKind::Normal,
            is_const: false,
            visibility: Visibility::Global,
            scope_kind: ScopeKind::Main,
            position,
        }
    }
}
