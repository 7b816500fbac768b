//! Read-only node handles.
//!
//! [`NodeRef`] pairs a tree with a node id and is the only way analyzers see
//! a node: its token, its parent, its children, and typed views of each
//! variant's fields. It is `Copy` and borrows the tree, so handles can be
//! stored freely in visitor state for as long as the tree lives.

use std::fmt;
use std::iter::FusedIterator;

use crate::ast::{CompareOpKind, Expr, ExprKind, LogicalOpKind, TokenSource};
use crate::{ExprId, ExprTree, Position, Span, Spanned, Token};

/// Handle to one node of an [`ExprTree`].
#[derive(Copy, Clone)]
pub struct NodeRef<'t> {
    tree: &'t ExprTree,
    id: ExprId,
}

impl<'t> NodeRef<'t> {
    #[inline]
    pub(crate) fn new(tree: &'t ExprTree, id: ExprId) -> Self {
        NodeRef { tree, id }
    }

    #[inline]
    pub fn id(self) -> ExprId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'t ExprTree {
        self.tree
    }

    #[inline]
    pub fn expr(self) -> &'t Expr {
        self.tree.get_expr(self.id)
    }

    #[inline]
    pub fn kind(self) -> &'t ExprKind {
        &self.expr().kind
    }

    /// First token of the node, for positions.
    ///
    /// Nodes without a token of their own report the token of their
    /// receiver, operand or left operand, recursively. Each hop moves to a
    /// strictly smaller id, so the loop ends at an own-token node.
    pub fn token(self) -> &'t Token {
        let mut id = self.id;
        loop {
            match self.tree.get_expr(id).kind.token_source() {
                TokenSource::Own(token) => return self.tree.get_token(token),
                TokenSource::Child(child) => {
                    debug_assert!(child < id, "token delegation must move to a child");
                    id = child;
                }
            }
        }
    }

    /// Line and column of [`token`](Self::token).
    #[inline]
    pub fn position(self) -> Position {
        self.token().pos
    }

    /// Enclosing node, `None` for the root.
    #[inline]
    pub fn parent(self) -> Option<NodeRef<'t>> {
        self.expr().parent().map(|id| NodeRef::new(self.tree, id))
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self.expr().parent().is_none()
    }

    /// Direct children, in traversal order.
    #[inline]
    pub fn children(self) -> Children<'t> {
        Children::new(self)
    }

    /// Enclosing nodes from the parent up to the root.
    #[inline]
    pub fn ancestors(self) -> Ancestors<'t> {
        Ancestors {
            tree: self.tree,
            next: self.expr().parent(),
        }
    }

    /// Number of nodes in the subtree rooted here, including this node.
    pub fn subtree_size(self) -> usize {
        wfe_stack::ensure_sufficient_stack(|| {
            1 + self.children().map(NodeRef::subtree_size).sum::<usize>()
        })
    }

    // ===== Typed views =====

    /// Variable name.
    pub fn as_variable(self) -> Option<&'t str> {
        match *self.kind() {
            ExprKind::Variable { name, .. } => Some(self.tree.name(name)),
            _ => None,
        }
    }

    pub fn is_null(self) -> bool {
        matches!(self.kind(), ExprKind::Null { .. })
    }

    pub fn as_bool(self) -> Option<bool> {
        match *self.kind() {
            ExprKind::Bool { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match *self.kind() {
            ExprKind::Int { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_float(self) -> Option<f64> {
        self.kind().float_value()
    }

    /// String literal value, unquoted and unescaped.
    pub fn as_string(self) -> Option<&'t str> {
        match *self.kind() {
            ExprKind::String { value, .. } => Some(self.tree.name(value)),
            _ => None,
        }
    }

    pub fn as_object_deref(self) -> Option<ObjectDerefRef<'t>> {
        match *self.kind() {
            ExprKind::ObjectDeref { receiver, property } => Some(ObjectDerefRef {
                node: self,
                receiver,
                property: self.tree.name(property),
            }),
            _ => None,
        }
    }

    pub fn as_array_deref(self) -> Option<ArrayDerefRef<'t>> {
        match *self.kind() {
            ExprKind::ArrayDeref { receiver } => Some(ArrayDerefRef {
                node: self,
                receiver,
            }),
            _ => None,
        }
    }

    pub fn as_index_access(self) -> Option<IndexAccessRef<'t>> {
        match *self.kind() {
            ExprKind::IndexAccess { operand, index } => Some(IndexAccessRef {
                node: self,
                operand,
                index,
            }),
            _ => None,
        }
    }

    pub fn as_not_op(self) -> Option<NotOpRef<'t>> {
        match *self.kind() {
            ExprKind::NotOp { operand, .. } => Some(NotOpRef {
                node: self,
                operand,
            }),
            _ => None,
        }
    }

    pub fn as_compare_op(self) -> Option<CompareOpRef<'t>> {
        match *self.kind() {
            ExprKind::CompareOp { kind, left, right } => Some(CompareOpRef {
                node: self,
                kind,
                left,
                right,
            }),
            _ => None,
        }
    }

    pub fn as_logical_op(self) -> Option<LogicalOpRef<'t>> {
        match *self.kind() {
            ExprKind::LogicalOp { kind, left, right } => Some(LogicalOpRef {
                node: self,
                kind,
                left,
                right,
            }),
            _ => None,
        }
    }

    pub fn as_func_call(self) -> Option<FuncCallRef<'t>> {
        match *self.kind() {
            ExprKind::FuncCall { callee, args, .. } => Some(FuncCallRef {
                node: self,
                callee: self.tree.name(callee),
                args: self.tree.get_expr_list(args),
            }),
            _ => None,
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} @ {}", self.id, self.kind().description(), self.position())
    }
}

impl Spanned for NodeRef<'_> {
    fn span(&self) -> Span {
        self.token().span
    }
}

// ===== Typed views =====

/// `receiver.property`
#[derive(Copy, Clone, Debug)]
pub struct ObjectDerefRef<'t> {
    node: NodeRef<'t>,
    receiver: ExprId,
    property: &'t str,
}

impl<'t> ObjectDerefRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn receiver(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.receiver)
    }

    pub fn property(self) -> &'t str {
        self.property
    }
}

/// `receiver.*`
#[derive(Copy, Clone, Debug)]
pub struct ArrayDerefRef<'t> {
    node: NodeRef<'t>,
    receiver: ExprId,
}

impl<'t> ArrayDerefRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn receiver(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.receiver)
    }
}

/// `operand[index]`
#[derive(Copy, Clone, Debug)]
pub struct IndexAccessRef<'t> {
    node: NodeRef<'t>,
    operand: ExprId,
    index: ExprId,
}

impl<'t> IndexAccessRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn operand(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.operand)
    }

    pub fn index(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.index)
    }
}

/// `!operand`
#[derive(Copy, Clone, Debug)]
pub struct NotOpRef<'t> {
    node: NodeRef<'t>,
    operand: ExprId,
}

impl<'t> NotOpRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn operand(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.operand)
    }
}

/// `left <op> right`
#[derive(Copy, Clone, Debug)]
pub struct CompareOpRef<'t> {
    node: NodeRef<'t>,
    kind: CompareOpKind,
    left: ExprId,
    right: ExprId,
}

impl<'t> CompareOpRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn kind(self) -> CompareOpKind {
        self.kind
    }

    pub fn left(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.left)
    }

    pub fn right(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.right)
    }
}

/// `left && right`, `left || right`
#[derive(Copy, Clone, Debug)]
pub struct LogicalOpRef<'t> {
    node: NodeRef<'t>,
    kind: LogicalOpKind,
    left: ExprId,
    right: ExprId,
}

impl<'t> LogicalOpRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    pub fn kind(self) -> LogicalOpKind {
        self.kind
    }

    pub fn left(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.left)
    }

    pub fn right(self) -> NodeRef<'t> {
        NodeRef::new(self.node.tree, self.right)
    }
}

/// `callee(args...)`
#[derive(Copy, Clone, Debug)]
pub struct FuncCallRef<'t> {
    node: NodeRef<'t>,
    callee: &'t str,
    args: &'t [ExprId],
}

impl<'t> FuncCallRef<'t> {
    pub fn node(self) -> NodeRef<'t> {
        self.node
    }

    /// Function name as written; builtin lookup is case-insensitive.
    pub fn callee(self) -> &'t str {
        self.callee
    }

    pub fn arg_count(self) -> usize {
        self.args.len()
    }

    /// Argument `i`, `None` past the end.
    pub fn arg(self, i: usize) -> Option<NodeRef<'t>> {
        self.args.get(i).map(|&id| NodeRef::new(self.node.tree, id))
    }

    pub fn args(self) -> impl ExactSizeIterator<Item = NodeRef<'t>> + 't {
        let tree = self.node.tree;
        self.args.iter().map(move |&id| NodeRef::new(tree, id))
    }
}

// ===== Iterators =====

/// Children of a node in traversal order. See [`NodeRef::children`].
#[derive(Clone)]
pub struct Children<'t> {
    tree: &'t ExprTree,
    fixed: [ExprId; 2],
    fixed_len: usize,
    pos: usize,
    list: std::slice::Iter<'t, ExprId>,
}

impl<'t> Children<'t> {
    fn new(node: NodeRef<'t>) -> Self {
        let tree = node.tree;
        let (fixed, fixed_len, list): ([ExprId; 2], usize, &'t [ExprId]) = match *node.kind() {
            ExprKind::Variable { .. }
            | ExprKind::Null { .. }
            | ExprKind::Bool { .. }
            | ExprKind::Int { .. }
            | ExprKind::Float { .. }
            | ExprKind::String { .. } => ([ExprId::INVALID; 2], 0, &[]),
            ExprKind::ObjectDeref { receiver, .. } | ExprKind::ArrayDeref { receiver } => {
                ([receiver, ExprId::INVALID], 1, &[])
            }
            // Index before operand: untrusted-input checks classify the index
            // before they decide whether the whole access is flagged.
            ExprKind::IndexAccess { operand, index } => ([index, operand], 2, &[]),
            ExprKind::NotOp { operand, .. } => ([operand, ExprId::INVALID], 1, &[]),
            ExprKind::CompareOp { left, right, .. } | ExprKind::LogicalOp { left, right, .. } => {
                ([left, right], 2, &[])
            }
            ExprKind::FuncCall { args, .. } => ([ExprId::INVALID; 2], 0, tree.get_expr_list(args)),
        };
        Children {
            tree,
            fixed,
            fixed_len,
            pos: 0,
            list: list.iter(),
        }
    }
}

impl<'t> Iterator for Children<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = if self.pos < self.fixed_len {
            self.pos += 1;
            self.fixed[self.pos - 1]
        } else {
            *self.list.next()?
        };
        Some(NodeRef::new(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.fixed_len - self.pos + self.list.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

/// Upward walk from a node's parent to the root. See [`NodeRef::ancestors`].
#[derive(Clone)]
pub struct Ancestors<'t> {
    tree: &'t ExprTree,
    next: Option<ExprId>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let next = self.tree.get_expr(id).parent();
        debug_assert!(
            next.is_none_or(|parent| parent > id),
            "parent links must move to larger ids"
        );
        self.next = next;
        Some(NodeRef::new(self.tree, id))
    }
}

impl FusedIterator for Ancestors<'_> {}
