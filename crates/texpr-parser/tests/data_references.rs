//! Data reference and global reference tests.

use texpr_ast::{Expr, ExprKind};
use texpr_parser::{parse_data_reference, parse_expression, parse_global};

/// Helper to parse an expression from source.
fn parse(source: &str) -> Expr {
    parse_expression(source).expect("Parse failed").into_child()
}

/// Helper to destructure a data reference.
fn data_ref(expr: &Expr) -> (bool, &[Expr]) {
    match &expr.kind {
        ExprKind::DataRef { injected, steps } => (*injected, steps.as_slice()),
        other => panic!("expected data ref, got {:?}", other),
    }
}

fn assert_key(step: &Expr, name: &str) {
    assert!(
        matches!(&step.kind, ExprKind::DataKey(k) if k == name),
        "expected key '{}', got {:?}",
        name,
        step.kind
    );
}

// =============================================================================
// Base Forms
// =============================================================================

#[test]
fn test_plain_variable_reference() {
    let expr = parse("$aaa");
    let (injected, steps) = data_ref(&expr);
    assert!(!injected);
    assert_eq!(steps.len(), 1);
    assert_key(&steps[0], "aaa");
}

#[test]
fn test_injected_reference() {
    let expr = parse("$ij.aaa");
    let (injected, steps) = data_ref(&expr);
    assert!(injected);
    assert_eq!(steps.len(), 1);
    assert_key(&steps[0], "aaa");
}

#[test]
fn test_injected_base_key_may_be_any_identifier() {
    // Even `ij` is fine after the `$ij.` prefix
    let expr = parse("$ij.ij");
    let (injected, steps) = data_ref(&expr);
    assert!(injected);
    assert_key(&steps[0], "ij");
}

// =============================================================================
// Access Chains
// =============================================================================

#[test]
fn test_full_access_chain() {
    // $aaa.bbb.0.ccc[12] → Key, Key, Index, Key, Int
    let expr = parse("$aaa.bbb.0.ccc[12]");
    let (injected, steps) = data_ref(&expr);
    assert!(!injected);
    assert_eq!(steps.len(), 5);
    assert_key(&steps[0], "aaa");
    assert_key(&steps[1], "bbb");
    assert!(matches!(steps[2].kind, ExprKind::DataIndex(0)));
    assert_key(&steps[3], "ccc");
    assert!(matches!(steps[4].kind, ExprKind::Int(12)));
}

#[test]
fn test_bracket_step_takes_any_expression() {
    let expr = parse("$items[$i + 1]");
    let (_, steps) = data_ref(&expr);
    assert_eq!(steps.len(), 2);
    assert!(matches!(steps[1].kind, ExprKind::Binary { .. }));

    let expr = parse("$map['key']");
    let (_, steps) = data_ref(&expr);
    assert!(matches!(&steps[1].kind, ExprKind::Str(s) if s == "key"));
}

#[test]
fn test_bracket_step_on_injected_reference() {
    let expr = parse("$ij.users[0]");
    let (injected, steps) = data_ref(&expr);
    assert!(injected);
    assert_eq!(steps.len(), 2);
    assert!(matches!(steps[1].kind, ExprKind::Int(0)));
}

#[test]
fn test_whitespace_around_dots() {
    // Whitespace (including newlines) is allowed between the dot and the
    // following identifier or index
    let expr = parse("$aaa.\n  bbb. 0");
    let (_, steps) = data_ref(&expr);
    assert_eq!(steps.len(), 3);
    assert_key(&steps[1], "bbb");
    assert!(matches!(steps[2].kind, ExprKind::DataIndex(0)));
}

#[test]
fn test_data_ref_inside_expression() {
    let expr = parse("$a.b + 1");
    match &expr.kind {
        ExprKind::Binary { left, .. } => {
            let (_, steps) = data_ref(left);
            assert_eq!(steps.len(), 2);
        }
        other => panic!("expected binary, got {:?}", other),
    }
}

// =============================================================================
// Globals
// =============================================================================

#[test]
fn test_single_segment_global() {
    assert!(matches!(parse("foo").kind, ExprKind::Global(name) if name == "foo"));
}

#[test]
fn test_dotted_global() {
    assert!(matches!(
        parse("app.flags.debug").kind,
        ExprKind::Global(name) if name == "app.flags.debug"
    ));
}

#[test]
fn test_global_entry_point() {
    let root = parse_global("aaa.bbb.ccc").expect("Parse failed");
    assert!(matches!(
        &root.child().kind,
        ExprKind::Global(name) if name == "aaa.bbb.ccc"
    ));
}

#[test]
fn test_global_with_whitespace_between_segments() {
    let root = parse_global("aaa . bbb").expect("Parse failed");
    assert!(matches!(
        &root.child().kind,
        ExprKind::Global(name) if name == "aaa.bbb"
    ));
}

#[test]
fn test_globals_in_comparison() {
    let expr = parse("a.b == c.d");
    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            assert!(matches!(&left.kind, ExprKind::Global(n) if n == "a.b"));
            assert!(matches!(&right.kind, ExprKind::Global(n) if n == "c.d"));
        }
        other => panic!("expected binary, got {:?}", other),
    }
}

// =============================================================================
// Entry Point Shapes
// =============================================================================

#[test]
fn test_data_reference_entry_point() {
    let root = parse_data_reference("$aaa.bbb").expect("Parse failed");
    let (injected, steps) = data_ref(root.child());
    assert!(!injected);
    assert_eq!(steps.len(), 2);
}

#[test]
fn test_data_reference_entry_point_injected() {
    let root = parse_data_reference("$ij.conf.limit").expect("Parse failed");
    let (injected, steps) = data_ref(root.child());
    assert!(injected);
    assert_eq!(steps.len(), 2);
    assert_key(&steps[0], "conf");
    assert_key(&steps[1], "limit");
}
