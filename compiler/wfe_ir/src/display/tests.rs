use pretty_assertions::assert_eq;

use crate::test_helpers::{and_of_compares, index_of_derefs, TestArena};
use crate::CompareOpKind;

#[test]
fn test_postfix_chains() {
    assert_eq!(index_of_derefs().root().to_string(), "foo.bar[baz.qux]");

    let mut t = TestArena::new();
    let matrix = t.var("matrix");
    let star = t.star(matrix);
    let name = t.deref(star, "name");
    let tree = t.finish(name);
    assert_eq!(tree.root().to_string(), "matrix.*.name");
}

#[test]
fn test_literals() {
    let mut t = TestArena::new();
    let null = t.null();
    let yes = t.bool(false);
    let n = t.int(-7);
    let f = t.float(2.0);
    let s = t.string("it's");
    let call = t.call("format", &[null, yes, n, f, s]);
    let tree = t.finish(call);
    assert_eq!(tree.root().to_string(), "format(null, false, -7, 2.0, 'it''s')");
}

#[test]
fn test_binary_without_redundant_parens() {
    assert_eq!(and_of_compares().root().to_string(), "a == b && c != d");
}

#[test]
fn test_looser_operand_is_parenthesized() {
    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let or = t.or(a, b);
    let c = t.var("c");
    let and = t.and(or, c);
    let not = t.not(and);
    let tree = t.finish(not);
    assert_eq!(tree.root().to_string(), "!((a || b) && c)");
}

#[test]
fn test_right_nested_same_operator_keeps_parens() {
    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let c = t.var("c");
    let inner = t.and(b, c);
    let outer = t.and(a, inner);
    let tree = t.finish(outer);
    assert_eq!(tree.root().to_string(), "a && (b && c)");

    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let inner = t.and(a, b);
    let c = t.var("c");
    let outer = t.and(inner, c);
    let tree = t.finish(outer);
    assert_eq!(tree.root().to_string(), "a && b && c");
}

#[test]
fn test_chained_comparison_is_parenthesized() {
    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let eq = t.cmp(CompareOpKind::Eq, a, b);
    let c = t.var("c");
    let lt = t.cmp(CompareOpKind::Less, eq, c);
    let tree = t.finish(lt);
    assert_eq!(tree.root().to_string(), "(a == b) < c");
}

#[test]
fn test_postfix_on_parenthesized_operand() {
    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let or = t.or(a, b);
    let deref = t.deref(or, "x");
    let i = t.int(0);
    let index = t.index(deref, i);
    let tree = t.finish(index);
    assert_eq!(tree.root().to_string(), "(a || b).x[0]");
}
