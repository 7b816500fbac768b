//! Arena construction and the frozen tree.
//!
//! [`ExprArena`] is the producer side: the parser allocates nodes bottom-up,
//! children first, and each compound constructor records the new node as
//! the parent of its children. [`ExprArena::finish`] checks that exactly one
//! root remains and freezes everything into an [`ExprTree`], which is
//! immutable from then on.
//!
//! Because a child must exist before its parent and can be attached only
//! once, every parent id is strictly greater than its children's ids. Trees
//! built here are acyclic by construction.

use std::fmt;
use std::sync::Arc;

use crate::ast::{CompareOpKind, Expr, ExprKind, LogicalOpKind};
use crate::name::NamePool;
use crate::{BuildError, ExprId, ExprRange, Name, NodeRef, Token, TokenId};

/// Convert a length to a `u32` index, or report which index space overflowed.
pub(crate) fn to_u32(count: usize, what: &'static str) -> Result<u32, BuildError> {
    u32::try_from(count).map_err(|_| BuildError::CapacityExceeded {
        what,
        count,
        max: u32::MAX as usize,
    })
}

fn to_u16(count: usize, what: &'static str) -> Result<u16, BuildError> {
    u16::try_from(count).map_err(|_| BuildError::CapacityExceeded {
        what,
        count,
        max: u16::MAX as usize,
    })
}

/// Builder for one expression tree.
///
/// # Index Spaces
///
/// - `exprs`: nodes, indexed by [`ExprId`]
/// - `expr_lists`: flattened call arguments, indexed by [`ExprRange`]
/// - `tokens`: own tokens, indexed by [`TokenId`]
/// - `names`: strings, indexed by [`Name`]
#[derive(Clone, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    tokens: Vec<Token>,
    names: NamePool,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity estimated from the expression source length.
    /// Heuristic: ~1 node per 4 bytes of source, one token per 2 nodes.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated_exprs = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimated_exprs),
            expr_lists: Vec::with_capacity(estimated_exprs / 8),
            tokens: Vec::with_capacity(estimated_exprs / 2),
            names: NamePool::new(),
        }
    }

    /// Number of nodes allocated so far.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Get a node allocated by this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    // ===== Leaves =====

    /// `github`, `env`, `matrix`, ...
    pub fn variable(&mut self, name: &str, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        let name = self.names.intern(name)?;
        self.push(ExprKind::Variable { name, token })
    }

    pub fn null(&mut self, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        self.push(ExprKind::Null { token })
    }

    pub fn bool(&mut self, value: bool, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        self.push(ExprKind::Bool { value, token })
    }

    pub fn int(&mut self, value: i64, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        self.push(ExprKind::Int { value, token })
    }

    pub fn float(&mut self, value: f64, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        self.push(ExprKind::Float {
            bits: value.to_bits(),
            token,
        })
    }

    /// String literal. `value` has quotes stripped and escapes resolved;
    /// the token keeps the raw text.
    pub fn string(&mut self, value: &str, token: Token) -> Result<ExprId, BuildError> {
        let token = self.push_token(token)?;
        let value = self.names.intern(value)?;
        self.push(ExprKind::String { value, token })
    }

    // ===== Compound nodes =====

    /// `receiver.property`
    pub fn object_deref(&mut self, receiver: ExprId, property: &str) -> Result<ExprId, BuildError> {
        let property = self.names.intern(property)?;
        self.push_with_children(ExprKind::ObjectDeref { receiver, property }, &[receiver])
    }

    /// `receiver.*`
    pub fn array_deref(&mut self, receiver: ExprId) -> Result<ExprId, BuildError> {
        self.push_with_children(ExprKind::ArrayDeref { receiver }, &[receiver])
    }

    /// `operand[index]`
    pub fn index_access(&mut self, operand: ExprId, index: ExprId) -> Result<ExprId, BuildError> {
        self.push_with_children(ExprKind::IndexAccess { operand, index }, &[operand, index])
    }

    /// `!operand`, where `token` is the `!` itself.
    pub fn not_op(&mut self, token: Token, operand: ExprId) -> Result<ExprId, BuildError> {
        self.check_attachable(&[operand])?;
        let token = self.push_token(token)?;
        self.push_with_children(ExprKind::NotOp { operand, token }, &[operand])
    }

    pub fn compare_op(
        &mut self,
        kind: CompareOpKind,
        left: ExprId,
        right: ExprId,
    ) -> Result<ExprId, BuildError> {
        self.push_with_children(ExprKind::CompareOp { kind, left, right }, &[left, right])
    }

    pub fn logical_op(
        &mut self,
        kind: LogicalOpKind,
        left: ExprId,
        right: ExprId,
    ) -> Result<ExprId, BuildError> {
        self.push_with_children(ExprKind::LogicalOp { kind, left, right }, &[left, right])
    }

    /// `callee(args...)`, where `token` is the callee identifier.
    pub fn func_call(
        &mut self,
        callee: &str,
        token: Token,
        args: impl IntoIterator<Item = ExprId>,
    ) -> Result<ExprId, BuildError> {
        let args: Vec<ExprId> = args.into_iter().collect();
        self.check_attachable(&args)?;
        let len = to_u16(args.len(), "function arguments")?;
        let end = to_u32(self.expr_lists.len() + args.len(), "argument list entries")?;
        let start = end - u32::from(len);

        let token = self.push_token(token)?;
        let callee = self.names.intern(callee)?;
        let id = self.push_with_children(
            ExprKind::FuncCall {
                callee,
                args: ExprRange::new(start, len),
                token,
            },
            &args,
        )?;
        self.expr_lists.extend_from_slice(&args);
        Ok(id)
    }

    // ===== Freezing =====

    /// Freeze the arena into a tree rooted at `root`.
    ///
    /// Fails if `root` is itself attached somewhere, or if any other node
    /// was never attached to a parent.
    #[tracing::instrument(level = "trace", skip_all, fields(root = %root, nodes = self.exprs.len()))]
    pub fn finish(self, root: ExprId) -> Result<ExprTree, BuildError> {
        let Some(root_expr) = self.exprs.get(root.index()) else {
            return Err(BuildError::UnknownExpr { id: root });
        };
        if let Some(parent) = root_expr.parent() {
            tracing::debug!(%root, %parent, "root candidate is attached");
            return Err(BuildError::RootHasParent { root, parent });
        }
        if let Some(index) = (0..self.exprs.len())
            .find(|&index| index != root.index() && self.exprs[index].parent().is_none())
        {
            let id = ExprId::new(to_u32(index, "expressions")?);
            tracing::debug!(%id, "detached expression");
            return Err(BuildError::Detached { id });
        }

        tracing::trace!(tokens = self.tokens.len(), names = self.names.len(), "tree frozen");
        Ok(ExprTree {
            exprs: self.exprs,
            expr_lists: self.expr_lists,
            tokens: self.tokens,
            names: self.names,
            root,
        })
    }

    // ===== Internals =====

    /// Tokens must carry a real line and column; node positions come from
    /// them.
    fn push_token(&mut self, token: Token) -> Result<TokenId, BuildError> {
        if !token.pos.is_valid() {
            tracing::debug!(value = %token.value, position = %token.pos, "token without position");
            return Err(BuildError::InvalidPosition {
                kind: token.kind,
                position: token.pos,
            });
        }
        let id = TokenId::new(to_u32(self.tokens.len(), "tokens")?);
        self.tokens.push(token);
        Ok(id)
    }

    fn push(&mut self, kind: ExprKind) -> Result<ExprId, BuildError> {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions")?);
        self.exprs.push(Expr::new(kind));
        Ok(id)
    }

    /// Every child must exist, be unattached, and appear once.
    fn check_attachable(&self, children: &[ExprId]) -> Result<(), BuildError> {
        for (i, &child) in children.iter().enumerate() {
            let Some(expr) = self.exprs.get(child.index()) else {
                tracing::debug!(%child, "unknown child");
                return Err(BuildError::UnknownExpr { id: child });
            };
            if let Some(parent) = expr.parent() {
                tracing::debug!(%child, %parent, "child already attached");
                return Err(BuildError::AlreadyAttached { child, parent });
            }
            if children[..i].contains(&child) {
                // Second slot of the same node being built
                let parent = ExprId::new(to_u32(self.exprs.len(), "expressions")?);
                tracing::debug!(%child, %parent, "child used twice");
                return Err(BuildError::AlreadyAttached { child, parent });
            }
        }
        Ok(())
    }

    /// Allocate a compound node and point each child's parent slot at it.
    fn push_with_children(
        &mut self,
        kind: ExprKind,
        children: &[ExprId],
    ) -> Result<ExprId, BuildError> {
        self.check_attachable(children)?;
        let id = self.push(kind)?;
        for &child in children {
            self.exprs[child.index()].parent = id;
        }
        Ok(id)
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs)
            .field("tokens", &self.tokens.len())
            .field("names", &self.names.len())
            .finish()
    }
}

/// An immutable expression tree.
///
/// Produced once by [`ExprArena::finish`]; only read afterwards. It owns
/// plain vectors, so it is `Send + Sync` and can be traversed from any
/// number of threads at once.
#[derive(Clone)]
pub struct ExprTree {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    tokens: Vec<Token>,
    names: NamePool,
    root: ExprId,
}

impl ExprTree {
    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.root)
    }

    #[inline]
    pub fn root_id(&self) -> ExprId {
        self.root
    }

    /// Handle for `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a node of this tree.
    #[inline]
    #[track_caller]
    pub fn node(&self, id: ExprId) -> NodeRef<'_> {
        assert!(id.index() < self.exprs.len(), "{id:?} is not in this tree");
        NodeRef::new(self, id)
    }

    /// Handle for `id`, `None` if it is not a node of this tree.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<NodeRef<'_>> {
        (id.index() < self.exprs.len()).then(|| NodeRef::new(self, id))
    }

    /// All nodes in allocation order, which puts children before parents.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "node count was checked against u32 during construction"
    )]
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> + '_ {
        self.exprs
            .iter()
            .enumerate()
            .map(move |(index, _)| NodeRef::new(self, ExprId::new(index as u32)))
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Always false: a finished tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        let end = start + range.len();
        &self.expr_lists[start..end]
    }

    #[inline]
    #[track_caller]
    pub fn get_token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Resolve a name from this tree.
    #[inline]
    #[track_caller]
    pub fn name(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    /// All tokens referenced by own-token nodes, in allocation order.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Debug for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprTree")
            .field("root", &self.root)
            .field("exprs", &self.exprs)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Reference-counted tree for sharing between analyzer threads.
#[derive(Clone)]
pub struct SharedTree(Arc<ExprTree>);

impl SharedTree {
    pub fn new(tree: ExprTree) -> Self {
        SharedTree(Arc::new(tree))
    }
}

impl std::ops::Deref for SharedTree {
    type Target = ExprTree;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedTree({:?})", &*self.0)
    }
}
