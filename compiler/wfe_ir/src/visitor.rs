//! Tree traversal and ancestor queries.
//!
//! # Traversal
//!
//! [`visit`] walks a tree depth-first and calls the visitor twice per node:
//! with `entering = true` before the node's children, and with
//! `entering = false` after them. The parent argument is the node the walk
//! came from, `None` for the starting node.
//!
//! Children are visited in a fixed order:
//!
//! | Node | Children |
//! |---|---|
//! | `ObjectDeref`, `ArrayDeref` | receiver |
//! | `IndexAccess` | **index, then operand** |
//! | `NotOp` | operand |
//! | `CompareOp`, `LogicalOp` | left, then right |
//! | `FuncCall` | arguments in order |
//! | literals, `Variable` | none |
//!
//! The walk cannot be cut short. A visitor that is done keeps a flag in its
//! own state and ignores the remaining calls:
//!
//! ```text
//! let mut found = None;
//! visit(tree.root(), |node, _, entering| {
//!     if entering && found.is_none() && node.as_variable() == Some("secrets") {
//!         found = Some(node);
//!     }
//! });
//! ```
//!
//! # Ancestor Search
//!
//! [`find_parent`] walks up from a node's parent and stops at the first
//! ancestor the predicate accepts, handing back both the ancestor and
//! whatever the predicate extracted from it.

use wfe_stack::ensure_sufficient_stack;

use crate::NodeRef;

/// Receives enter/leave notifications from [`walk`].
///
/// Implemented for every `FnMut(node, parent, entering)` closure.
pub trait Visitor<'t> {
    fn visit_node(&mut self, node: NodeRef<'t>, parent: Option<NodeRef<'t>>, entering: bool);
}

impl<'t, F> Visitor<'t> for F
where
    F: FnMut(NodeRef<'t>, Option<NodeRef<'t>>, bool),
{
    #[inline]
    fn visit_node(&mut self, node: NodeRef<'t>, parent: Option<NodeRef<'t>>, entering: bool) {
        self(node, parent, entering);
    }
}

/// Visit the subtree at `root` with a callback.
pub fn visit<'t, F>(root: NodeRef<'t>, mut f: F)
where
    F: FnMut(NodeRef<'t>, Option<NodeRef<'t>>, bool),
{
    walk(root, &mut f);
}

/// Walk the subtree at `root` with a [`Visitor`].
///
/// `root` is reported with no parent even if it has one in the tree.
pub fn walk<'t, V: Visitor<'t> + ?Sized>(root: NodeRef<'t>, visitor: &mut V) {
    walk_node(root, None, visitor);
}

fn walk_node<'t, V: Visitor<'t> + ?Sized>(
    node: NodeRef<'t>,
    parent: Option<NodeRef<'t>>,
    visitor: &mut V,
) {
    visitor.visit_node(node, parent, true);
    ensure_sufficient_stack(|| {
        for child in node.children() {
            walk_node(child, Some(node), visitor);
        }
    });
    visitor.visit_node(node, parent, false);
}

/// Nearest ancestor of `node` for which `predicate` returns `Some`.
///
/// Starts at `node`'s parent, never `node` itself. Returns the ancestor with
/// the predicate's payload, or `None` once the root has been passed.
///
/// ```text
/// // Innermost function call enclosing a node
/// let call = find_parent(node, |n| n.as_func_call());
/// ```
pub fn find_parent<'t, T, P>(node: NodeRef<'t>, mut predicate: P) -> Option<(NodeRef<'t>, T)>
where
    P: FnMut(NodeRef<'t>) -> Option<T>,
{
    node.ancestors()
        .find_map(|ancestor| predicate(ancestor).map(|payload| (ancestor, payload)))
}

impl crate::ExprTree {
    /// Visit the whole tree from its root. See [`visit`].
    pub fn visit<'t, F>(&'t self, f: F)
    where
        F: FnMut(NodeRef<'t>, Option<NodeRef<'t>>, bool),
    {
        visit(self.root(), f);
    }
}

#[cfg(test)]
mod tests;
