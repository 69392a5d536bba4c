//! Shared fixtures for building tiny contract ASTs in tests.

use oraclex_ast::{Arena, Builder, ElementaryTypeKind, Mutability, NodeId, Visibility};

/// Builds `oracleQuery("<kind>", <args...>)` as a standalone call expression.
pub fn oracle_query_call(b: &mut Builder<'_>, kind: &str, extra_args: Vec<NodeId>) -> NodeId {
    let callee = b.ident("oracleQuery");
    let kind_arg = b.lit_string(kind);
    let mut args = vec![kind_arg];
    args.extend(extra_args);
    b.call(callee, args)
}

/// Wraps a single statement in a one-statement function body and returns the
/// function definition node id.
pub fn function_with_body(b: &mut Builder<'_>, name: &str, statements: Vec<NodeId>) -> NodeId {
    let body = b.block(statements);
    let params = b.params(vec![]);
    b.function_def(name, params, Visibility::Public, Mutability::NonPayable, body)
}

/// Builds a one-function, one-contract source unit and returns
/// `(source_unit, contract, function)`.
pub fn single_function_contract(
    b: &mut Builder<'_>,
    contract_name: &str,
    function_name: &str,
    statements: Vec<NodeId>,
) -> (NodeId, NodeId, NodeId) {
    let function = function_with_body(b, function_name, statements);
    let contract = b.contract_def(contract_name, vec![function]);
    let source_unit = b.source_unit(vec![contract]);
    (source_unit, contract, function)
}

pub fn new_arena() -> Arena {
    Arena::new()
}

pub fn uint_type(b: &mut Builder<'_>) -> NodeId {
    b.elementary_type(ElementaryTypeKind::Uint)
}
