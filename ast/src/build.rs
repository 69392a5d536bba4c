use crate::arena::{Arena, NodeId};
use crate::loc::SourceLoc;
use crate::node::*;

/// Thin convenience layer over [`Arena::push`] that stamps every node it
/// creates with a synthetic location and an empty doc string.
///
/// `oraclex-core` never constructs [`Node`] variants directly; it goes
/// through a `Builder` so that every synthesized node looks the same
/// regardless of which rewrite stage produced it.
pub struct Builder<'a> {
    arena: &'a mut Arena,
}

impl<'a> Builder<'a> {
    pub fn new(arena: &'a mut Arena) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &Arena {
        self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        self.arena
    }

    pub fn lit_int(&mut self, value: i128) -> NodeId {
        self.push(Node::Literal(Literal {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            value: LiteralValue::Int(value),
        }))
    }

    pub fn lit_bool(&mut self, value: bool) -> NodeId {
        self.push(Node::Literal(Literal {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            value: LiteralValue::Bool(value),
        }))
    }

    pub fn lit_string(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::Literal(Literal {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            value: LiteralValue::Str(value.into()),
        }))
    }

    pub fn ident(&mut self, name: impl Into<String>) -> NodeId {
        self.push(Node::Identifier(Identifier {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            name: name.into(),
        }))
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::Binary(Binary {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            op,
            lhs,
            rhs,
        }))
    }

    pub fn unary(&mut self, op: UnaryOp, expr: NodeId) -> NodeId {
        self.push(Node::Unary(Unary {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            op,
            expr,
        }))
    }

    pub fn index_access(&mut self, base: NodeId, index: NodeId) -> NodeId {
        self.push(Node::IndexAccess(IndexAccess {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            base,
            index,
        }))
    }

    pub fn member_access(&mut self, base: NodeId, name: impl Into<String>) -> NodeId {
        self.push(Node::MemberAccess(MemberAccess {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            base,
            name: name.into(),
        }))
    }

    pub fn assign(&mut self, op: AssignOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::Assign(Assign {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            op,
            lhs,
            rhs,
        }))
    }

    pub fn call(&mut self, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        self.push(Node::Call(Call {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            callee,
            args,
        }))
    }

    pub fn elementary_type(&mut self, kind: ElementaryTypeKind) -> NodeId {
        self.push(Node::ElementaryType(ElementaryType {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            kind,
        }))
    }

    pub fn array_type(&mut self, base: NodeId, len: Option<NodeId>) -> NodeId {
        self.push(Node::ArrayType(ArrayType {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            base,
            len,
        }))
    }

    pub fn tuple(&mut self, items: Vec<NodeId>) -> NodeId {
        self.push(Node::Tuple(Tuple {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            items,
        }))
    }

    pub fn var_decl(
        &mut self,
        type_name: Option<NodeId>,
        name: impl Into<String>,
        visibility: Visibility,
    ) -> NodeId {
        self.push(Node::VarDecl(VarDecl {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            type_name,
            name: name.into(),
            visibility,
        }))
    }

    pub fn var_decl_stmt(&mut self, decl: NodeId, init: Option<NodeId>) -> NodeId {
        self.push(Node::VarDeclStmt(VarDeclStmt {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            decl,
            init,
        }))
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.push(Node::ExprStmt(ExprStmt {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            expr,
        }))
    }

    pub fn if_stmt(&mut self, cond: NodeId, then_branch: NodeId, else_branch: Option<NodeId>) -> NodeId {
        self.push(Node::If(IfStmt {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            cond,
            then_branch,
            else_branch,
        }))
    }

    pub fn for_stmt(
        &mut self,
        init: Option<NodeId>,
        cond: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.push(Node::For(ForStmt {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            init,
            cond,
            update,
            body,
        }))
    }

    pub fn break_stmt(&mut self) -> NodeId {
        self.push(Node::Break(BreakStmt {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
        }))
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.push(Node::Block(Block {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            statements,
        }))
    }

    pub fn struct_def(&mut self, name: impl Into<String>, members: Vec<NodeId>) -> NodeId {
        self.push(Node::Struct(StructDef {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            name: name.into(),
            members,
        }))
    }

    pub fn event_def(&mut self, name: impl Into<String>, params: NodeId) -> NodeId {
        self.push(Node::Event(EventDef {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            name: name.into(),
            params,
        }))
    }

    pub fn params(&mut self, params: Vec<NodeId>) -> NodeId {
        self.push(Node::Params(ParamList {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            params,
        }))
    }

    pub fn function_def(
        &mut self,
        name: impl Into<String>,
        params: NodeId,
        visibility: Visibility,
        mutability: Mutability,
        body: NodeId,
    ) -> NodeId {
        self.push(Node::Function(FunctionDef {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            name: name.into(),
            params,
            visibility,
            mutability,
            body,
        }))
    }

    pub fn contract_def(&mut self, name: impl Into<String>, subnodes: Vec<NodeId>) -> NodeId {
        self.push(Node::Contract(ContractDef {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            name: name.into(),
            subnodes,
        }))
    }

    pub fn source_unit(&mut self, contracts: Vec<NodeId>) -> NodeId {
        self.push(Node::SourceUnit(SourceUnitNode {
            loc: SourceLoc::synthetic(),
            doc: String::new(),
            contracts,
        }))
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.arena.push(node)
    }
}
