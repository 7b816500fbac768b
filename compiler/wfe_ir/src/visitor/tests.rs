use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{and_of_compares, index_of_derefs, TestArena};
use crate::{CompareOpKind, ExprId, ExprTree};

/// Source text of each node in entering order.
fn entering_order(tree: &ExprTree) -> Vec<String> {
    let mut seen = Vec::new();
    tree.visit(|node, _, entering| {
        if entering {
            seen.push(node.to_string());
        }
    });
    seen
}

#[test]
fn test_index_is_visited_before_operand() {
    let tree = index_of_derefs();
    assert_eq!(
        entering_order(&tree),
        vec!["foo.bar[baz.qux]", "baz.qux", "baz", "foo.bar", "foo"]
    );
}

#[test]
fn test_binary_operands_left_to_right() {
    let tree = and_of_compares();
    assert_eq!(
        entering_order(&tree),
        vec!["a == b && c != d", "a == b", "a", "b", "c != d", "c", "d"]
    );
}

#[test]
fn test_call_arguments_in_order() {
    let mut t = TestArena::new();
    let first = t.string("x");
    let second = t.var("y");
    let third = t.int(3);
    let call = t.call("format", &[first, second, third]);
    let tree = t.finish(call);

    let mut ids = Vec::new();
    tree.visit(|node, _, entering| {
        if entering {
            ids.push(node.id());
        }
    });
    assert_eq!(ids, vec![call, first, second, third]);
}

#[test]
fn test_two_callbacks_per_node() {
    for tree in [index_of_derefs(), and_of_compares()] {
        let mut enters = 0;
        let mut leaves = 0;
        tree.visit(|_, _, entering| {
            if entering {
                enters += 1;
            } else {
                leaves += 1;
            }
        });
        assert_eq!(enters, tree.len());
        assert_eq!(leaves, tree.len());
    }
}

#[test]
fn test_enter_and_leave_are_bracketed() {
    let tree = and_of_compares();
    let mut stack: Vec<ExprId> = Vec::new();
    let mut events = Vec::new();
    tree.visit(|node, parent, entering| {
        if entering {
            assert_eq!(parent.map(NodeRef::id), stack.last().copied());
            stack.push(node.id());
            events.push(format!("+{}", node.id().raw()));
        } else {
            assert_eq!(stack.pop(), Some(node.id()));
            assert_eq!(parent.map(NodeRef::id), stack.last().copied());
            events.push(format!("-{}", node.id().raw()));
        }
    });
    assert!(stack.is_empty());
    // ids: a=0 b=1 eq=2 c=3 d=4 ne=5 and=6
    assert_eq!(
        events,
        vec!["+6", "+2", "+0", "-0", "+1", "-1", "-2", "+5", "+3", "-3", "+4", "-4", "-5", "-6"]
    );
}

#[test]
fn test_parent_argument_matches_tree_parent() {
    let tree = index_of_derefs();
    tree.visit(|node, parent, _| {
        assert_eq!(parent, node.parent());
    });
}

#[test]
fn test_subtree_walk_reports_no_parent_for_start() {
    let tree = index_of_derefs();
    let Some(index) = tree.root().as_index_access() else {
        panic!("not an index access");
    };
    let start = index.operand();
    assert!(start.parent().is_some());

    let mut visited = Vec::new();
    visit(start, |node, parent, entering| {
        if entering {
            visited.push((node.to_string(), parent.map(|p| p.to_string())));
        }
    });
    assert_eq!(
        visited,
        vec![
            ("foo.bar".to_string(), None),
            ("foo".to_string(), Some("foo.bar".to_string())),
        ]
    );
}

#[test]
fn test_early_termination_flag() {
    let mut t = TestArena::new();
    let a = t.var("a");
    let secrets = t.var("secrets");
    let token = t.deref(secrets, "TOKEN");
    let cmp = t.cmp(CompareOpKind::Eq, a, token);
    let other = t.var("secrets");
    let root = t.and(cmp, other);
    let tree = t.finish(root);

    let mut found = None;
    let mut calls = 0;
    tree.visit(|node, _, entering| {
        calls += 1;
        if entering && found.is_none() && node.as_variable() == Some("secrets") {
            found = Some(node);
        }
    });
    assert_eq!(found.map(NodeRef::id), Some(secrets));
    assert_eq!(calls, 2 * tree.len());
}

struct DepthCounter {
    depth: usize,
    max_depth: usize,
}

impl<'t> Visitor<'t> for DepthCounter {
    fn visit_node(&mut self, _: NodeRef<'t>, _: Option<NodeRef<'t>>, entering: bool) {
        if entering {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        } else {
            self.depth -= 1;
        }
    }
}

#[test]
fn test_walk_with_visitor_struct() {
    let tree = index_of_derefs();
    let mut counter = DepthCounter {
        depth: 0,
        max_depth: 0,
    };
    walk(tree.root(), &mut counter);
    assert_eq!(counter.depth, 0);
    assert_eq!(counter.max_depth, 3);
}

#[test]
fn test_find_parent_returns_nearest_match() {
    let mut t = TestArena::new();
    let x = t.var("x");
    let inner = t.call("toJSON", &[x]);
    let outer = t.call("fromJSON", &[inner]);
    let not = t.not(outer);
    let tree = t.finish(not);

    let found = find_parent(tree.node(x), |n| n.as_func_call().map(|c| c.callee()));
    let Some((node, callee)) = found else {
        panic!("no enclosing call");
    };
    assert_eq!(node.id(), inner);
    assert_eq!(callee, "toJSON");

    let found = find_parent(tree.node(x), |n| n.as_not_op().map(|_| ()));
    assert_eq!(found.map(|(n, ())| n.id()), Some(not));
}

#[test]
fn test_find_parent_skips_the_node_itself() {
    let mut t = TestArena::new();
    let x = t.var("x");
    let call = t.call("toJSON", &[x]);
    let tree = t.finish(call);

    let mut tested = Vec::new();
    let found = find_parent(tree.root(), |n| {
        tested.push(n.id());
        n.as_func_call()
    });
    assert!(found.is_none());
    assert!(tested.is_empty());

    let found = find_parent(tree.node(x), |n| {
        tested.push(n.id());
        None::<()>
    });
    assert!(found.is_none());
    assert_eq!(tested, vec![call]);
}

#[test]
fn test_find_parent_payload_can_borrow_tree() {
    let tree = index_of_derefs();
    let Some(baz) = tree.nodes().find(|n| n.as_variable() == Some("baz")) else {
        panic!("no baz");
    };
    let found = find_parent(baz, |n| n.as_index_access().map(|i| i.operand()));
    let Some((index, operand)) = found else {
        panic!("baz is inside an index access");
    };
    assert_eq!(index, tree.root());
    assert_eq!(operand.to_string(), "foo.bar");
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    const DEPTH: usize = 100_000;
    let mut t = TestArena::new();
    let mut id = t.var("x");
    for _ in 0..DEPTH {
        id = t.not(id);
    }
    let tree = t.finish(id);

    let mut enters = 0;
    tree.visit(|_, _, entering| {
        if entering {
            enters += 1;
        }
    });
    assert_eq!(enters, DEPTH + 1);

    let Some(leaf) = tree.get(ExprId::new(0)) else {
        panic!("no leaf");
    };
    assert_eq!(leaf.ancestors().count(), DEPTH);
    let root = find_parent(leaf, |n| n.is_root().then_some(()));
    assert_eq!(root.map(|(n, ())| n.id()), Some(tree.root_id()));
}
