use super::*;
use crate::lexer::tokenize;

fn check(src: &str) -> SyntaxReport {
    let tokens = tokenize(src).expect("fixture must lex cleanly");
    analyze(&tokens)
}

#[test]
fn simple_variable_declaration_is_accepted() {
    let report = check("var x = 1 + 2 * 3;");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn ternary_declaration_is_accepted() {
    let report = check("var y = a == 1 ? 2 : 3;");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn function_with_typed_params_is_accepted() {
    let report = check("function:int add(a:int, b:int) { return a + b; }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn class_with_inheritance_and_interface_is_accepted() {
    let report = check("class C extends B with I => { var n = 0; }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn check_is_dispatch_is_accepted() {
    let report = check("check (s) { is 1: { break; } is 2: { continue; } }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn missing_expression_after_equals_reports_one_error_and_recovers() {
    // var x = ; var y = 2;  — one diagnostic at ';', recovery resumes at
    // the next declaration so `y` still parses.
    let report = check("var x = ; var y = 2;");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(!report.ok);
}

#[test]
fn unmatched_opening_brace_is_reported() {
    let report = check("function f() { var x = 1;");
    assert!(!report.ok);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.code == crate::errors::ErrorCode::E0202));
}

#[test]
fn const_without_initializer_is_rejected() {
    let report = check("const x;");
    assert!(!report.ok);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.code == crate::errors::ErrorCode::E0301));
}

#[test]
fn deeply_nested_parentheses_are_accepted() {
    let depth = 100;
    let mut src = String::from("var x = ");
    src.push_str(&"(".repeat(depth));
    src.push('1');
    src.push_str(&")".repeat(depth));
    src.push(';');
    let report = check(&src);
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn try_catch_is_accepted() {
    let report = check("try { risky(); } catch (String e) { log(e); }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn for_loop_header_is_accepted() {
    let report = check("for (var i = 0; i < 10; i++) { total += i; }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn class_access_chain_statement_is_accepted() {
    let report = check("obj->field = 1;");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn include_and_export_are_accepted() {
    let report = check(r#"include "io"; export "api";"#);
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn enum_with_explicit_values_is_accepted() {
    let report = check("enum Color { RED: 1, GREEN: 2, BLUE: 3 }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn array_assignment_literal_is_accepted() {
    let report = check("var xs = { 1, 2, 3 };");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn class_instance_declaration_is_accepted() {
    let report = check("var c = new Widget(1, 2);");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn constructor_declaration_is_accepted() {
    let report = check("this::constructor(a:int) { var x = a; }");
    assert!(report.ok, "{:?}", report.diagnostics);
}

#[test]
fn error_inside_function_body_names_its_context() {
    let report = check("function f() { var = 1; }");
    assert!(!report.ok);
    assert!(report.diagnostics[0].message.contains("in function body"));
}

#[test]
fn error_at_top_level_has_no_context_suffix() {
    let report = check("var = 1;");
    assert!(!report.ok);
    assert!(!report.diagnostics[0].message.contains("in function body"));
}
