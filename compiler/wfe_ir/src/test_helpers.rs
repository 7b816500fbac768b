//! Shorthand tree construction for unit tests.
//!
//! Wraps [`ExprArena`] with one method per node shape that fabricates the
//! token (each on its own column of line 1) and unwraps the result.

#![allow(clippy::unwrap_used)]

use crate::{
    CompareOpKind, ExprArena, ExprId, ExprTree, LogicalOpKind, Position, Span, Token, TokenKind,
};

pub(crate) struct TestArena {
    pub(crate) arena: ExprArena,
    offset: u32,
}

impl TestArena {
    pub(crate) fn new() -> Self {
        TestArena {
            arena: ExprArena::new(),
            offset: 0,
        }
    }

    pub(crate) fn tok(&mut self, kind: TokenKind, text: &str) -> Token {
        let start = self.offset;
        let len = u32::try_from(text.len()).unwrap();
        self.offset += len + 1;
        Token::new(
            kind,
            text,
            Span::new(start, start + len),
            Position::new(1, start + 1),
        )
    }

    pub(crate) fn var(&mut self, name: &str) -> ExprId {
        let tok = self.tok(TokenKind::Ident, name);
        self.arena.variable(name, tok).unwrap()
    }

    pub(crate) fn null(&mut self) -> ExprId {
        let tok = self.tok(TokenKind::Ident, "null");
        self.arena.null(tok).unwrap()
    }

    pub(crate) fn bool(&mut self, value: bool) -> ExprId {
        let tok = self.tok(TokenKind::Ident, if value { "true" } else { "false" });
        self.arena.bool(value, tok).unwrap()
    }

    pub(crate) fn int(&mut self, value: i64) -> ExprId {
        let tok = self.tok(TokenKind::Int, &value.to_string());
        self.arena.int(value, tok).unwrap()
    }

    pub(crate) fn float(&mut self, value: f64) -> ExprId {
        let tok = self.tok(TokenKind::Float, &format!("{value:?}"));
        self.arena.float(value, tok).unwrap()
    }

    pub(crate) fn string(&mut self, value: &str) -> ExprId {
        let raw = format!("'{}'", value.replace('\'', "''"));
        let tok = self.tok(TokenKind::String, &raw);
        self.arena.string(value, tok).unwrap()
    }

    pub(crate) fn deref(&mut self, receiver: ExprId, property: &str) -> ExprId {
        self.arena.object_deref(receiver, property).unwrap()
    }

    pub(crate) fn star(&mut self, receiver: ExprId) -> ExprId {
        self.arena.array_deref(receiver).unwrap()
    }

    pub(crate) fn index(&mut self, operand: ExprId, index: ExprId) -> ExprId {
        self.arena.index_access(operand, index).unwrap()
    }

    pub(crate) fn not(&mut self, operand: ExprId) -> ExprId {
        let tok = self.tok(TokenKind::Not, "!");
        self.arena.not_op(tok, operand).unwrap()
    }

    pub(crate) fn cmp(&mut self, kind: CompareOpKind, left: ExprId, right: ExprId) -> ExprId {
        self.arena.compare_op(kind, left, right).unwrap()
    }

    pub(crate) fn and(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.arena.logical_op(LogicalOpKind::And, left, right).unwrap()
    }

    pub(crate) fn or(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.arena.logical_op(LogicalOpKind::Or, left, right).unwrap()
    }

    pub(crate) fn call(&mut self, callee: &str, args: &[ExprId]) -> ExprId {
        let tok = self.tok(TokenKind::Ident, callee);
        self.arena.func_call(callee, tok, args.iter().copied()).unwrap()
    }

    pub(crate) fn finish(self, root: ExprId) -> ExprTree {
        self.arena.finish(root).unwrap()
    }
}

/// `foo.bar[baz.qux]`
pub(crate) fn index_of_derefs() -> ExprTree {
    let mut t = TestArena::new();
    let foo = t.var("foo");
    let foo_bar = t.deref(foo, "bar");
    let baz = t.var("baz");
    let baz_qux = t.deref(baz, "qux");
    let root = t.index(foo_bar, baz_qux);
    t.finish(root)
}

/// `a == b && c != d`
pub(crate) fn and_of_compares() -> ExprTree {
    let mut t = TestArena::new();
    let a = t.var("a");
    let b = t.var("b");
    let eq = t.cmp(CompareOpKind::Eq, a, b);
    let c = t.var("c");
    let d = t.var("d");
    let ne = t.cmp(CompareOpKind::NotEq, c, d);
    let root = t.and(eq, ne);
    t.finish(root)
}
