//! Source rendering of subtrees.
//!
//! `Display` for [`NodeRef`] prints the subtree in expression syntax with
//! the minimum parentheses needed to parse back to the same shape. String
//! literals are re-quoted, so the output is not the original source text
//! byte for byte.

use std::fmt;

use wfe_stack::ensure_sufficient_stack;

use crate::ast::ExprKind;
use crate::NodeRef;

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(*self, f)
    }
}

fn render(node: NodeRef<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    ensure_sufficient_stack(|| {
        let tree = node.tree();
        match *node.kind() {
            ExprKind::Variable { name, .. } => f.write_str(tree.name(name)),
            ExprKind::Null { .. } => f.write_str("null"),
            ExprKind::Bool { value, .. } => write!(f, "{value}"),
            ExprKind::Int { value, .. } => write!(f, "{value}"),
            ExprKind::Float { bits, .. } => write!(f, "{:?}", f64::from_bits(bits)),
            ExprKind::String { value, .. } => {
                write!(f, "'{}'", tree.name(value).replace('\'', "''"))
            }
            ExprKind::ObjectDeref { receiver, property } => {
                render_operand(node, tree.node(receiver), 0, f)?;
                write!(f, ".{}", tree.name(property))
            }
            ExprKind::ArrayDeref { receiver } => {
                render_operand(node, tree.node(receiver), 0, f)?;
                f.write_str(".*")
            }
            ExprKind::IndexAccess { operand, index } => {
                render_operand(node, tree.node(operand), 0, f)?;
                f.write_str("[")?;
                render(tree.node(index), f)?;
                f.write_str("]")
            }
            ExprKind::NotOp { operand, .. } => {
                f.write_str("!")?;
                render_operand(node, tree.node(operand), 1, f)
            }
            ExprKind::CompareOp { kind, left, right } => {
                render_binary(node, left, kind.as_symbol(), right, f)
            }
            ExprKind::LogicalOp { kind, left, right } => {
                render_binary(node, left, kind.as_symbol(), right, f)
            }
            ExprKind::FuncCall { callee, args, .. } => {
                write!(f, "{}(", tree.name(callee))?;
                for (i, &arg) in tree.get_expr_list(args).iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    render(tree.node(arg), f)?;
                }
                f.write_str(")")
            }
        }
    })
}

/// Render `child` of `parent`, parenthesized if it binds looser than `max`.
fn render_operand(
    parent: NodeRef<'_>,
    child: NodeRef<'_>,
    max: u8,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    debug_assert_eq!(child.parent(), Some(parent));
    if child.kind().precedence() > max {
        f.write_str("(")?;
        render(child, f)?;
        f.write_str(")")
    } else {
        render(child, f)
    }
}

/// Binary operators associate to the left. Comparisons never chain without
/// parentheses, since `a == b < c` reads differently across hosts.
fn render_binary(
    node: NodeRef<'_>,
    left: crate::ExprId,
    symbol: &str,
    right: crate::ExprId,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let tree = node.tree();
    let prec = node.kind().precedence();
    let is_compare = matches!(node.kind(), ExprKind::CompareOp { .. });
    let left_max = if is_compare { prec - 1 } else { prec };
    render_operand(node, tree.node(left), left_max, f)?;
    write!(f, " {symbol} ")?;
    render_operand(node, tree.node(right), prec - 1, f)
}

#[cfg(test)]
mod tests;
