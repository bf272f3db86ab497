//! Phase 4: walks the AST the parse-tree generator produced, builds nested
//! scopes, and reports redeclarations (spec §4.4).
//!
//! Each construct that spec §3.5 lists a `scope kind` for opens exactly one
//! new [`ScopeId`] and the construct's statements are walked directly into
//! it — there is no separate scope for the brace-delimited `Runnable`
//! wrapping those statements, since "runnable"/"block" is not itself one of
//! the listed scope kinds. `try`/`catch` bodies are walked into the
//! *enclosing* scope for the same reason: spec §3.5's scope-kind list has
//! no `try` or `catch` entry.

use crate::ast::{Node, NodeKind};
use crate::base::{Name, Span};

use super::error::SemanticError;
use super::scope::{ScopeId, ScopeKind};
use super::symbol::{DeclaredType, SymbolEntry, VarKind, Visibility};
use super::table::SymbolTable;

pub struct SemanticReport {
    pub table: SymbolTable,
    pub errors: Vec<SemanticError>,
}

impl SemanticReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the semantic pass over an AST root (a top-level `Runnable`, as
/// produced by [`crate::ast::generate`]).
pub fn analyze(root: &Node) -> SemanticReport {
    let mut table = SymbolTable::new(root.span);
    let mut errors = Vec::new();
    let scope = table.root();
    walk_statements(&root.details, &mut table, scope, &mut errors);
    SemanticReport { table, errors }
}

/// Extracts the visibility from a declaration's `left` (modifier) slot,
/// reporting [`SemanticError::ModifierMisuse`] if that slot is occupied by
/// something other than a `Modifier` node (spec §4.4's internal-invariant
/// check).
fn visibility_of(node: &Node, errors: &mut Vec<SemanticError>) -> Visibility {
    match &node.left {
        None => Visibility::default(),
        Some(modifier) if modifier.kind == NodeKind::Modifier => {
            Visibility::from_modifier_text(&modifier.value)
        }
        Some(other) => {
            errors.push(SemanticError::ModifierMisuse { span: other.span });
            Visibility::default()
        }
    }
}

/// Reads the `var-type` child (if any) out of a declaration's `details`,
/// per spec §4.4 step 4. An unannotated declaration resolves to `custom`
/// with an empty name — spec §8 scenario 1 pins this exact classification
/// for a type-less `var x = ...;`.
fn declared_type_of(node: &Node) -> DeclaredType {
    node.details
        .iter()
        .find(|d| d.kind == NodeKind::VarType)
        .map(|vt| DeclaredType::from_type_name(&vt.value))
        .unwrap_or_else(|| DeclaredType::Custom(Name::new("")))
}

fn literal_value_of(node: &Node) -> Option<String> {
    node.right.as_ref().map(|r| r.value.clone())
}

fn dimension_of(node: &Node) -> u32 {
    node.details
        .iter()
        .filter(|d| d.kind == NodeKind::VarDimension)
        .count() as u32
}

fn declare_variable(
    node: &Node,
    table: &mut SymbolTable,
    scope: ScopeId,
    errors: &mut Vec<SemanticError>,
) {
    let visibility = visibility_of(node, errors);
    let declared_type = declared_type_of(node);
    let var_kind = match node.kind {
        NodeKind::CondVar => VarKind::Conditional,
        NodeKind::ArrayVar => VarKind::Array,
        NodeKind::VarClassInstance => VarKind::ClassInstance,
        _ => VarKind::Normal,
    };
    let class_type = if node.kind == NodeKind::VarClassInstance {
        node.right.as_ref().map(|r| Name::new(&r.value))
    } else {
        None
    };

    let name = table.intern(&node.value);
    let mut entry = SymbolEntry::new(name, declared_type, node.span);
    entry.literal_value = literal_value_of(node);
    entry.dimension = dimension_of(node);
    entry.class_type = class_type;
    entry.var_kind = var_kind;
    entry.visibility = visibility;
    entry.scope_kind = table.scope(scope).kind;

    if !table.insert(scope, entry) {
        report_redeclaration(table, scope, &node.value, node.span, errors);
    }
}

fn report_redeclaration(
    table: &SymbolTable,
    scope: ScopeId,
    name: &str,
    span: Span,
    errors: &mut Vec<SemanticError>,
) {
    let first_declared = table.resolve(scope, name).map(|e| e.position).unwrap_or(span);
    errors.push(SemanticError::Redeclaration {
        name: name.to_string(),
        span,
        first_declared,
    });
}

/// Inserts a function/constructor's parameter list into its freshly opened
/// scope. Parameters are the leading `details` entries up to (but not
/// including) the trailing `Runnable` body.
fn declare_params(params: &[Node], table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    for param in params {
        let declared_type = declared_type_of(param);
        let name = table.intern(&param.value);
        let mut entry = SymbolEntry::new(name, declared_type, param.span);
        entry.dimension = dimension_of(param);
        entry.scope_kind = table.scope(scope).kind;
        if param.kind == NodeKind::Pointer || param.kind == NodeKind::Reference {
            entry.declared_type = DeclaredType::Custom(Name::new(""));
        }
        if !table.insert_parameter(scope, entry) {
            report_redeclaration(table, scope, &param.value, param.span, errors);
        }
    }
}

fn declare_function(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let visibility = visibility_of(node, errors);
    let declared_type = node
        .right
        .as_ref()
        .map(|rt| DeclaredType::from_type_name(&rt.value))
        .unwrap_or_else(|| DeclaredType::Custom(Name::new("")));

    let name = table.intern(&node.value);
    let mut entry = SymbolEntry::new(name.clone(), declared_type, node.span);
    entry.visibility = visibility;
    entry.scope_kind = table.scope(scope).kind;
    if !table.insert(scope, entry) {
        report_redeclaration(table, scope, &node.value, node.span, errors);
    }

    let (params, body) = split_params_and_body(&node.details);
    let fn_scope = table.enter_scope(scope, ScopeKind::Function, Some(name), node.span);
    declare_params(params, table, fn_scope, errors);
    if let Some(body) = body {
        walk_statements(&body.details, table, fn_scope, errors);
    }
}

fn declare_constructor(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let (params, body) = split_params_and_body(&node.details);
    let ctor_scope = table.enter_scope(scope, ScopeKind::Constructor, None, node.span);
    declare_params(params, table, ctor_scope, errors);
    if let Some(body) = body {
        walk_statements(&body.details, table, ctor_scope, errors);
    }
}

/// Splits a `Function`/`Constructor` node's `details` into its leading
/// parameter list and trailing `Runnable` body (spec §4.3's shape table:
/// `details=[params…, Runnable]`).
fn split_params_and_body(details: &[Node]) -> (&[Node], Option<&Node>) {
    match details.split_last() {
        Some((body, params)) if body.kind == NodeKind::Runnable => (params, Some(body)),
        _ => (details, None),
    }
}

fn declare_class(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let visibility = visibility_of(node, errors);
    let name = table.intern(&node.value);
    let mut entry = SymbolEntry::new(name.clone(), DeclaredType::Custom(name.clone()), node.span);
    entry.visibility = visibility;
    entry.scope_kind = table.scope(scope).kind;
    if !table.insert(scope, entry) {
        report_redeclaration(table, scope, &node.value, node.span, errors);
    }

    let class_scope = table.enter_scope(scope, ScopeKind::Class, Some(name), node.span);
    if let Some(body) = &node.right {
        walk_statements(&body.details, table, class_scope, errors);
    }
}

fn declare_enum(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let name = table.intern(&node.value);
    let mut entry = SymbolEntry::new(name.clone(), DeclaredType::Custom(name.clone()), node.span);
    entry.scope_kind = table.scope(scope).kind;
    if !table.insert(scope, entry) {
        report_redeclaration(table, scope, &node.value, node.span, errors);
    }

    let enum_scope = table.enter_scope(scope, ScopeKind::Enum, Some(name), node.span);
    for member in &node.details {
        let member_name = table.intern(&member.value);
        let mut member_entry = SymbolEntry::new(
            member_name.clone(),
            DeclaredType::Primitive(super::symbol::PrimitiveType::Int),
            member.span,
        );
        member_entry.literal_value = member.right.as_ref().map(|r| r.value.clone());
        member_entry.scope_kind = ScopeKind::Enum;
        if !table.insert(enum_scope, member_entry) {
            report_redeclaration(table, enum_scope, &member.value, member.span, errors);
        }
        // Each enumerator also opens its own (currently empty) scope, per
        // spec §3.5's scope-kind list naming `enumerator` distinctly from
        // `enum` — a forward-compatibility hook for per-member bodies a
        // future extension might add.
        table.enter_scope(enum_scope, ScopeKind::Enumerator, Some(member_name), member.span);
    }
}

fn declare_for(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let for_scope = table.enter_scope(scope, ScopeKind::For, None, node.span);
    if let Some(init) = &node.left {
        declare_variable(init, table, for_scope, errors);
    }
    if let Some(body) = &node.right {
        walk_statements(&body.details, table, for_scope, errors);
    }
}

fn control_flow_body(
    node: &Node,
    kind: ScopeKind,
    table: &mut SymbolTable,
    scope: ScopeId,
    errors: &mut Vec<SemanticError>,
) {
    let child = table.enter_scope(scope, kind, None, node.span);
    if let Some(body) = &node.right {
        walk_statements(&body.details, table, child, errors);
    }
}

fn declare_check(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    let check_scope = table.enter_scope(scope, ScopeKind::Check, None, node.span);
    if let Some(body) = &node.right {
        for arm in &body.details {
            if arm.kind != NodeKind::IsStmt {
                continue;
            }
            let is_scope = table.enter_scope(check_scope, ScopeKind::Is, None, arm.span);
            if let Some(arm_body) = &arm.right {
                walk_statements(&arm_body.details, table, is_scope, errors);
            }
        }
    }
}

fn declare_catch(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    if let Some(exc_name) = &node.left {
        let declared_type = exc_name
            .left
            .as_ref()
            .map(|t| DeclaredType::from_type_name(&t.value))
            .unwrap_or_else(|| DeclaredType::Custom(Name::new("")));
        let name = table.intern(&exc_name.value);
        let mut entry = SymbolEntry::new(name, declared_type, exc_name.span);
        entry.scope_kind = table.scope(scope).kind;
        if !table.insert(scope, entry) {
            report_redeclaration(table, scope, &exc_name.value, exc_name.span, errors);
        }
    }
    if let Some(body) = &node.right {
        walk_statements(&body.details, table, scope, errors);
    }
}

fn walk_statement(node: &Node, table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    match node.kind {
        NodeKind::Var | NodeKind::CondVar | NodeKind::ArrayVar | NodeKind::VarClassInstance => {
            declare_variable(node, table, scope, errors)
        }
        NodeKind::Function => declare_function(node, table, scope, errors),
        NodeKind::Constructor => declare_constructor(node, table, scope, errors),
        NodeKind::Class => declare_class(node, table, scope, errors),
        NodeKind::Enum => declare_enum(node, table, scope, errors),
        NodeKind::ForStmt => declare_for(node, table, scope, errors),
        NodeKind::IfStmt | NodeKind::ElseIfStmt | NodeKind::ElseStmt => {
            control_flow_body(node, ScopeKind::If, table, scope, errors)
        }
        NodeKind::WhileStmt => control_flow_body(node, ScopeKind::While, table, scope, errors),
        NodeKind::DoStmt => control_flow_body(node, ScopeKind::Do, table, scope, errors),
        NodeKind::CheckStmt => declare_check(node, table, scope, errors),
        NodeKind::CatchStmt => declare_catch(node, table, scope, errors),
        NodeKind::TryStmt => {
            for detail in &node.details {
                if detail.kind == NodeKind::Runnable {
                    walk_statements(&detail.details, table, scope, errors);
                }
            }
        }
        NodeKind::Runnable => walk_statements(&node.details, table, scope, errors),
        _ => {}
    }
}

fn walk_statements(stmts: &[Node], table: &mut SymbolTable, scope: ScopeId, errors: &mut Vec<SemanticError>) {
    for stmt in stmts {
        walk_statement(stmt, table, scope, errors);
    }
}
