use crate::arena::NodeId;
use crate::loc::SourceLoc;

/// Visibility attribute on a variable declaration or function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Visibility {
    Public,
    Private,
    #[default]
    Internal,
    External,
}

/// State mutability attribute on a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mutability {
    #[default]
    NonPayable,
    Payable,
    View,
    Pure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Exp,
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    Increment,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssignOp {
    Assign,
    AddAssign,
}

/// One of the elementary type names the grammar recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElementaryTypeKind {
    FixedBytes(u16),
    String,
    Uint,
    UintN(u16),
    Bool,
    Bytes,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LiteralValue {
    Int(i128),
    Bool(bool),
    Str(String),
}

macro_rules! node_struct {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $name {
            pub loc: SourceLoc,
            pub doc: String,
            $($(#[$fmeta])* pub $field: $ty,)*
        }
    };
}

node_struct!(
    /// An integer, boolean, or string literal.
    Literal { value: LiteralValue }
);

node_struct!(
    /// A bare identifier reference.
    Identifier { name: String }
);

node_struct!(
    /// A binary expression, e.g. `a + b`.
    Binary { op: BinaryOp, lhs: NodeId, rhs: NodeId }
);

node_struct!(
    /// A unary expression, e.g. `++i` or `delete x`.
    Unary { op: UnaryOp, expr: NodeId }
);

node_struct!(
    /// `base[index]`.
    IndexAccess { base: NodeId, index: NodeId }
);

node_struct!(
    /// `base.name`.
    MemberAccess { base: NodeId, name: String }
);

node_struct!(
    /// `lhs = rhs` or `lhs += rhs`.
    Assign { op: AssignOp, lhs: NodeId, rhs: NodeId }
);

node_struct!(
    /// `callee(args…)`.
    Call { callee: NodeId, args: Vec<NodeId> }
);

node_struct!(
    /// An elementary type name, e.g. `uint256`, `bytes32`, `string`.
    ElementaryType { kind: ElementaryTypeKind }
);

node_struct!(
    /// An array type name with an optional fixed length, e.g. `string[3]`.
    ArrayType { base: NodeId, len: Option<NodeId> }
);

node_struct!(
    /// A tuple expression, e.g. `("a", "b")`.
    Tuple { items: Vec<NodeId> }
);

node_struct!(
    /// A single variable declaration (struct member, parameter, or local).
    VarDecl {
        type_name: Option<NodeId>,
        name: String,
        visibility: Visibility,
    }
);

node_struct!(
    /// `T name = init;` or `T name;` as a statement.
    VarDeclStmt { decl: NodeId, init: Option<NodeId> }
);

node_struct!(
    /// An expression used as a statement.
    ExprStmt { expr: NodeId }
);

node_struct!(
    /// `if (cond) { then } else { else_branch }`.
    IfStmt {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    }
);

node_struct!(
    /// `for (init; cond; update) { body }`.
    ForStmt {
        init: Option<NodeId>,
        cond: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    }
);

node_struct!(
    /// `break;`.
    BreakStmt {}
);

node_struct!(
    /// `{ statements… }`.
    Block { statements: Vec<NodeId> }
);

node_struct!(
    /// `struct Name { members… }`.
    StructDef { name: String, members: Vec<NodeId> }
);

node_struct!(
    /// `event Name(params…);`.
    EventDef { name: String, params: NodeId }
);

node_struct!(
    /// `function name(params) visibility mutability { body }`.
    FunctionDef {
        name: String,
        params: NodeId,
        visibility: Visibility,
        mutability: Mutability,
        body: NodeId,
    }
);

node_struct!(
    /// A parenthesized, comma-separated parameter list.
    ParamList { params: Vec<NodeId> }
);

node_struct!(
    /// `contract Name { subnodes… }`.
    ContractDef { name: String, subnodes: Vec<NodeId> }
);

node_struct!(
    /// The root of a parsed source file: a list of contracts.
    SourceUnitNode { contracts: Vec<NodeId> }
);

/// Every concrete node kind the pass can read or construct.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Node {
    Literal(Literal),
    Identifier(Identifier),
    Binary(Binary),
    Unary(Unary),
    IndexAccess(IndexAccess),
    MemberAccess(MemberAccess),
    Assign(Assign),
    Call(Call),
    ElementaryType(ElementaryType),
    ArrayType(ArrayType),
    Tuple(Tuple),
    VarDecl(VarDecl),
    VarDeclStmt(VarDeclStmt),
    ExprStmt(ExprStmt),
    If(IfStmt),
    For(ForStmt),
    Break(BreakStmt),
    Block(Block),
    Struct(StructDef),
    Event(EventDef),
    Function(FunctionDef),
    Params(ParamList),
    Contract(ContractDef),
    SourceUnit(SourceUnitNode),
}

macro_rules! accessor {
    ($as_ref:ident, $variant:ident, $ty:ty) => {
        impl Node {
            pub fn $as_ref(&self) -> Option<&$ty> {
                match self {
                    Node::$variant(n) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

accessor!(as_literal, Literal, Literal);
accessor!(as_identifier, Identifier, Identifier);
accessor!(as_binary, Binary, Binary);
accessor!(as_call, Call, Call);
accessor!(as_if, If, IfStmt);
accessor!(as_struct, Struct, StructDef);
