//! Arena-backed AST node types and builder primitives.
//!
//! This crate knows nothing about oracle queries. It models the slice of a
//! smart-contract grammar the lowering pass in `oraclex-core` needs to read
//! and rewrite: contracts, functions, statements, expressions, and the
//! handful of declaration forms (structs, events, variables) the pass
//! synthesizes. Every node lives in an [`Arena`] and is referenced by
//! [`NodeId`]; there is no shared ownership and no node is ever attached to
//! two parents.

mod arena;
mod build;
mod loc;
mod node;

#[cfg(test)]
mod arena_tests;

pub use arena::{Arena, NodeId};
pub use build::Builder;
pub use loc::SourceLoc;
pub use node::{
    ArrayType, Assign, AssignOp, Binary, BinaryOp, Block, BreakStmt, Call, ContractDef,
    ElementaryType, ElementaryTypeKind, EventDef, ExprStmt, ForStmt, FunctionDef, Identifier,
    IfStmt, IndexAccess, Literal, LiteralValue, MemberAccess, Mutability, Node, ParamList,
    SourceUnitNode, StructDef, Tuple, Unary, UnaryOp, VarDecl, VarDeclStmt, Visibility,
};
