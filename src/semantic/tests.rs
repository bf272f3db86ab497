use rstest::rstest;

use crate::ast::generate;
use crate::lexer::tokenize;

use super::{analyze, ScopeKind};

fn analyze_src(src: &str) -> super::SemanticReport {
    let tokens = tokenize(src).expect("lex");
    let root = generate(&tokens);
    analyze(&root)
}

#[test]
fn plain_declaration_is_recorded() {
    let report = analyze_src("var x = 1 + 2 * 3;");
    assert!(report.is_ok());
    let entry = report.table.resolve(report.table.root(), "x").unwrap();
    assert_eq!(entry.name.as_str(), "x");
}

#[test]
fn redeclaration_in_same_scope_is_flagged() {
    let report = analyze_src("var x = 1; var x = 2;");
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0],
        super::SemanticError::Redeclaration { .. }
    ));
}

#[test]
fn shadowing_across_nested_scopes_is_flagged() {
    // spec §3.5's key invariant: name resolution walks the parent chain, and
    // shadowing is forbidden in this Language, so reusing an outer name in a
    // nested scope is a redeclaration, not legal shadowing.
    let src = "var x = 1; function f() { var x = 2; }";
    let report = analyze_src(src);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0],
        super::SemanticError::Redeclaration { .. }
    ));
}

#[test]
fn function_params_share_scope_with_body() {
    let src = "function add(a: int, b: int) { var sum = a + b; }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    assert_eq!(report.table.scope_count(), 2); // main + function
}

#[test]
fn duplicate_param_name_is_flagged() {
    let src = "function f(a: int, a: int) { }";
    let report = analyze_src(src);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn class_opens_its_own_scope() {
    let src = "class Vehicle => { var wheels = 4; }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    let class_scope = report
        .table
        .scope(report.table.root())
        .children
        .iter()
        .copied()
        .find(|id| report.table.scope(*id).kind == ScopeKind::Class)
        .expect("class scope");
    assert!(report.table.resolve(class_scope, "wheels").is_some());
}

#[test]
fn constructor_opens_its_own_scope() {
    let src = "class Vehicle => { this::constructor(speed: int) { var x = speed; } }";
    let report = analyze_src(src);
    assert!(report.is_ok());
}

#[test]
fn enum_members_live_in_enum_scope() {
    let src = "enum Color { RED: 0, GREEN: 1, BLUE: 2 }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    let enum_scope = report
        .table
        .scope(report.table.root())
        .children
        .iter()
        .copied()
        .find(|id| report.table.scope(*id).kind == ScopeKind::Enum)
        .expect("enum scope");
    let red = report.table.resolve(enum_scope, "RED").unwrap();
    assert_eq!(red.literal_value.as_deref(), Some("0"));
}

#[test]
fn duplicate_enum_member_is_flagged() {
    let src = "enum Color { RED: 0, RED: 1 }";
    let report = analyze_src(src);
    assert_eq!(report.errors.len(), 1);
}

#[rstest]
#[case("if (a > 0) { var x = 1; }", ScopeKind::If)]
#[case("while (a > 0) { var x = 1; }", ScopeKind::While)]
#[case("do { var x = 1; } while (a > 0);", ScopeKind::Do)]
fn control_flow_opens_named_scope_kind(#[case] src: &str, #[case] kind: ScopeKind) {
    let report = analyze_src(src);
    assert!(report.is_ok());
    let found = report
        .table
        .scope(report.table.root())
        .children
        .iter()
        .any(|id| report.table.scope(*id).kind == kind);
    assert!(found, "expected a {kind:?} scope");
}

#[test]
fn for_loop_init_var_is_visible_in_body() {
    let src = "for (var i = 0; i < 10; i++) { var doubled = i * 2; }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    let for_scope = report
        .table
        .scope(report.table.root())
        .children
        .iter()
        .copied()
        .find(|id| report.table.scope(*id).kind == ScopeKind::For)
        .expect("for scope");
    assert!(report.table.resolve(for_scope, "i").is_some());
    assert!(report.table.resolve(for_scope, "doubled").is_some());
}

#[test]
fn check_is_arms_get_their_own_scope() {
    let src = "check (value) { is 1: var x = 1; is 2: var y = 2; }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    let check_scope = report
        .table
        .scope(report.table.root())
        .children
        .iter()
        .copied()
        .find(|id| report.table.scope(*id).kind == ScopeKind::Check)
        .expect("check scope");
    let is_scopes: Vec<_> = report
        .table
        .scope(check_scope)
        .children
        .iter()
        .copied()
        .filter(|id| report.table.scope(*id).kind == ScopeKind::Is)
        .collect();
    assert_eq!(is_scopes.len(), 2);
}

#[test]
fn catch_binds_exception_name_in_enclosing_scope() {
    let src = "try { var x = 1; } catch (Error e) { var y = 2; }";
    let report = analyze_src(src);
    assert!(report.is_ok());
    assert!(report.table.resolve(report.table.root(), "e").is_some());
}

#[test]
fn unannotated_declaration_is_custom_with_empty_name() {
    let report = analyze_src("var x = 1;");
    let entry = report.table.resolve(report.table.root(), "x").unwrap();
    match &entry.declared_type {
        super::DeclaredType::Custom(name) => assert_eq!(name.as_str(), ""),
        other => panic!("expected custom type, got {other:?}"),
    }
}

#[test]
fn secure_modifier_is_recorded() {
    let report = analyze_src("secure var x = 1;");
    let entry = report.table.resolve(report.table.root(), "x").unwrap();
    assert_eq!(entry.visibility, super::Visibility::Secure);
}
