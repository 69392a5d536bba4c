//! The three rewrite stages applied to a contract once queries are recognized:
//! environment synthesis, container rewriting, and callback synthesis.

use oraclex_ast::{Builder, LiteralValue, Node, NodeId};

pub mod callback;
pub mod container;
pub mod environment;

#[cfg(test)]
mod environment_tests;

/// Builds a fresh identifier or literal node carrying the same value as `id`.
///
/// A recognized query's payload fields (`array`, `number`, `switch`, the
/// author's `callback`, ...) are author-supplied leaf nodes that the
/// container rewriter and the callback synthesizer each need to place as the
/// child of their own newly-built `Call`/`Binary` nodes. Re-deriving a fresh
/// node at every such use site — the same way `var_name`/`env_name` are
/// always passed through `b.ident(...)` again rather than cached — keeps
/// every constructed subtree owned by exactly one parent.
pub(crate) fn clone_leaf(b: &mut Builder<'_>, id: NodeId) -> NodeId {
    match b.arena().get(id).clone() {
        Node::Identifier(i) => b.ident(i.name),
        Node::Literal(lit) => match lit.value {
            LiteralValue::Int(v) => b.lit_int(v),
            LiteralValue::Bool(v) => b.lit_bool(v),
            LiteralValue::Str(v) => b.lit_string(v),
        },
        other => panic!("expected an identifier or literal leaf node, found {other:?}"),
    }
}
