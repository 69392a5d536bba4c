//! The AST walker that locates and classifies `oracleQuery(...)` calls.

use oraclex_ast::{Arena, Literal, LiteralValue, Node, NodeId};

use crate::config::PassConfig;
use crate::query::{OracleKind, Query, QueryPayload};

/// A call was identified as an `oracleQuery` invocation of a known kind, but
/// its argument shape did not match that kind's expected form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("oracleQuery(\"{kind}\", ...): expected {expected}")]
pub struct RecognitionError {
    pub kind: String,
    pub expected: String,
}

fn shape_error(kind: &str, expected: impl Into<String>) -> RecognitionError {
    RecognitionError {
        kind: kind.to_string(),
        expected: expected.into(),
    }
}

/// Walks every contract in `source_unit`, skipping the ones named in
/// [`PassConfig::is_ignored`], and returns the recognized queries grouped by
/// their containing contract. Contracts with no recognized calls are
/// included with an empty list so callers can distinguish "ignored" from
/// "visited, found nothing".
pub fn recognize(
    arena: &Arena,
    source_unit: NodeId,
) -> Result<Vec<(NodeId, Vec<Query>)>, RecognitionError> {
    let Node::SourceUnit(unit) = arena.get(source_unit) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for &contract in &unit.contracts {
        let Node::Contract(c) = arena.get(contract) else {
            continue;
        };
        if PassConfig::is_ignored(&c.name) {
            continue;
        }
        let queries = recognize_contract(arena, contract)?;
        out.push((contract, queries));
    }
    Ok(out)
}

/// Walks a single contract's functions, looking for `oracleQuery` calls.
pub fn recognize_contract(arena: &Arena, contract: NodeId) -> Result<Vec<Query>, RecognitionError> {
    let Node::Contract(c) = arena.get(contract) else {
        return Ok(Vec::new());
    };

    let mut queries = Vec::new();
    for &sub in &c.subnodes {
        if let Node::Function(f) = arena.get(sub) {
            walk_stmt(arena, f.body, sub, &mut queries)?;
        }
    }
    Ok(queries)
}

fn walk_stmt(
    arena: &Arena,
    stmt: NodeId,
    container: NodeId,
    out: &mut Vec<Query>,
) -> Result<(), RecognitionError> {
    match arena.get(stmt) {
        Node::Block(b) => {
            for &s in &b.statements {
                walk_stmt(arena, s, container, out)?;
            }
        }
        Node::If(i) => {
            walk_stmt(arena, i.then_branch, container, out)?;
            if let Some(e) = i.else_branch {
                walk_stmt(arena, e, container, out)?;
            }
        }
        Node::For(f) => {
            walk_stmt(arena, f.body, container, out)?;
        }
        Node::ExprStmt(e) => {
            if let Node::Call(call) = arena.get(e.expr) {
                if is_oracle_query_callee(arena, call.callee) {
                    if let Some(query) = try_recognize(arena, &call.args, container, stmt)? {
                        out.push(query);
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_oracle_query_callee(arena: &Arena, callee: NodeId) -> bool {
    matches!(arena.get(callee), Node::Identifier(id) if id.name == "oracleQuery")
}

/// Attempts to classify one `oracleQuery(...)` call's arguments.
///
/// Returns `Ok(None)` for calls that are not this pass's concern (too few
/// arguments, non-string first argument, or an unrecognized kind name) per
/// the silently-ignored cases of the error-handling design. Once a kind name
/// is recognized, any further shape mismatch is a fatal [`RecognitionError`].
fn try_recognize(
    arena: &Arena,
    args: &[NodeId],
    container: NodeId,
    call_stmt: NodeId,
) -> Result<Option<Query>, RecognitionError> {
    if args.len() < 2 {
        return Ok(None);
    }
    let Some(kind_name) = string_literal(arena, args[0]) else {
        return Ok(None);
    };
    let Some(kind) = OracleKind::from_name(&kind_name) else {
        return Ok(None);
    };

    let rest = &args[1..];
    let (callback, payload) = match kind {
        OracleKind::Data => recognize_data(arena, rest)?,
        OracleKind::Min => recognize_min(arena, rest)?,
        OracleKind::Sort => recognize_sort(arena, rest)?,
        OracleKind::Sqrt => recognize_sqrt(arena, rest)?,
        OracleKind::ThreeSum => recognize_three_sum(arena, rest)?,
        OracleKind::Kp => recognize_kp(arena, rest)?,
        OracleKind::Apsp => recognize_apsp(arena, rest)?,
        OracleKind::Kds => recognize_kds(arena, rest)?,
    };

    Ok(Some(Query::new(callback, container, call_stmt, payload)))
}

fn string_literal(arena: &Arena, id: NodeId) -> Option<String> {
    match arena.get(id) {
        Node::Literal(Literal {
            value: LiteralValue::Str(s),
            ..
        }) => Some(s.clone()),
        _ => None,
    }
}

fn bool_literal(arena: &Arena, id: NodeId) -> Option<bool> {
    match arena.get(id) {
        Node::Literal(Literal {
            value: LiteralValue::Bool(b),
            ..
        }) => Some(*b),
        _ => None,
    }
}

fn is_identifier(arena: &Arena, id: NodeId) -> bool {
    matches!(arena.get(id), Node::Identifier(_))
}

fn expect_identifier(arena: &Arena, id: NodeId) -> Option<NodeId> {
    is_identifier(arena, id).then_some(id)
}

/// Accepts an identifier or a numeric literal, per spec's "identifier or
/// numeric literal" number arguments (`Sqrt`'s number, `ThreeSum`'s sum,
/// `KP`'s path-length/max-weight, `KDS`'s max-size).
fn expect_number_expr(arena: &Arena, id: NodeId) -> Option<NodeId> {
    let is_number = matches!(arena.get(id), Node::Identifier(_))
        || matches!(
            arena.get(id),
            Node::Literal(Literal {
                value: LiteralValue::Int(_),
                ..
            })
        );
    is_number.then_some(id)
}

fn recognize_data(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 2 {
        return Err(shape_error(
            "data",
            "at least one URL literal followed by a callback identifier",
        ));
    }
    let (url_args, callback_arg) = args.split_at(args.len() - 1);
    let callback = expect_identifier(arena, callback_arg[0])
        .ok_or_else(|| shape_error("data", "callback argument must be an identifier"))?;
    let mut urls = Vec::with_capacity(url_args.len());
    for &a in url_args {
        let s = string_literal(arena, a)
            .ok_or_else(|| shape_error("data", "URL arguments must be string literals"))?;
        urls.push(s);
    }
    Ok((callback, QueryPayload::Data { urls }))
}

fn recognize_min(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 2 || args.len() > 4 {
        return Err(shape_error(
            "min",
            "array identifier, callback identifier, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("min", "array argument must be an identifier"))?;
    let callback = expect_identifier(arena, args[1])
        .ok_or_else(|| shape_error("min", "callback argument must be an identifier"))?;
    let url = args
        .get(2)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("min", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(3)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("min", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((callback, QueryPayload::Min { array, url, switch }))
}

fn recognize_apsp(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 2 || args.len() > 4 {
        return Err(shape_error(
            "apsp",
            "array identifier, callback identifier, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("apsp", "array argument must be an identifier"))?;
    let callback = expect_identifier(arena, args[1])
        .ok_or_else(|| shape_error("apsp", "callback argument must be an identifier"))?;
    let url = args
        .get(2)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("apsp", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(3)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("apsp", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((callback, QueryPayload::Apsp { array, url, switch }))
}

fn recognize_sort(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 2 || args.len() > 5 {
        return Err(shape_error(
            "sort",
            "array identifier, callback identifier, optional verify bool, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("sort", "array argument must be an identifier"))?;
    let callback = expect_identifier(arena, args[1])
        .ok_or_else(|| shape_error("sort", "callback argument must be an identifier"))?;
    let verify = args
        .get(2)
        .map(|&a| bool_literal(arena, a).ok_or_else(|| shape_error("sort", "optional verify argument must be a boolean literal")))
        .transpose()?
        .unwrap_or(false);
    let url = args
        .get(3)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("sort", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(4)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("sort", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((
        callback,
        QueryPayload::Sort {
            array,
            verify,
            url,
            switch,
        },
    ))
}

fn recognize_sqrt(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 2 || args.len() > 5 {
        return Err(shape_error(
            "sqrt",
            "number (identifier or numeric literal), callback identifier, optional verify bool, optional URL literal, optional switch identifier",
        ));
    }
    let number = expect_number_expr(arena, args[0])
        .ok_or_else(|| shape_error("sqrt", "number argument must be an identifier or numeric literal"))?;
    let callback = expect_identifier(arena, args[1])
        .ok_or_else(|| shape_error("sqrt", "callback argument must be an identifier"))?;
    let verify = args
        .get(2)
        .map(|&a| bool_literal(arena, a).ok_or_else(|| shape_error("sqrt", "optional verify argument must be a boolean literal")))
        .transpose()?
        .unwrap_or(false);
    let url = args
        .get(3)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("sqrt", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(4)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("sqrt", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((
        callback,
        QueryPayload::Sqrt {
            number,
            verify,
            url,
            switch,
        },
    ))
}

fn recognize_three_sum(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 3 || args.len() > 6 {
        return Err(shape_error(
            "3sum",
            "array identifier, sum (identifier or numeric literal), callback identifier, optional verify bool, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("3sum", "array argument must be an identifier"))?;
    let sum = expect_number_expr(arena, args[1])
        .ok_or_else(|| shape_error("3sum", "sum argument must be an identifier or numeric literal"))?;
    let callback = expect_identifier(arena, args[2])
        .ok_or_else(|| shape_error("3sum", "callback argument must be an identifier"))?;
    let verify = args
        .get(3)
        .map(|&a| bool_literal(arena, a).ok_or_else(|| shape_error("3sum", "optional verify argument must be a boolean literal")))
        .transpose()?
        .unwrap_or(false);
    let url = args
        .get(4)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("3sum", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(5)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("3sum", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((
        callback,
        QueryPayload::ThreeSum {
            array,
            sum,
            verify,
            url,
            switch,
        },
    ))
}

fn recognize_kp(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 4 || args.len() > 7 {
        return Err(shape_error(
            "kp",
            "array identifier, path-length (identifier or numeric literal), max-weight (identifier or numeric literal), callback identifier, optional verify bool, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("kp", "array argument must be an identifier"))?;
    let path_len = expect_number_expr(arena, args[1])
        .ok_or_else(|| shape_error("kp", "path-length argument must be an identifier or numeric literal"))?;
    let max_weight = expect_number_expr(arena, args[2])
        .ok_or_else(|| shape_error("kp", "max-weight argument must be an identifier or numeric literal"))?;
    let callback = expect_identifier(arena, args[3])
        .ok_or_else(|| shape_error("kp", "callback argument must be an identifier"))?;
    let verify = args
        .get(4)
        .map(|&a| bool_literal(arena, a).ok_or_else(|| shape_error("kp", "optional verify argument must be a boolean literal")))
        .transpose()?
        .unwrap_or(false);
    let url = args
        .get(5)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("kp", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(6)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("kp", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((
        callback,
        QueryPayload::Kp {
            array,
            path_len,
            max_weight,
            verify,
            url,
            switch,
        },
    ))
}

fn recognize_kds(arena: &Arena, args: &[NodeId]) -> Result<(NodeId, QueryPayload), RecognitionError> {
    if args.len() < 3 || args.len() > 6 {
        return Err(shape_error(
            "kds",
            "array identifier, max-size (identifier or numeric literal), callback identifier, optional verify bool, optional URL literal, optional switch identifier",
        ));
    }
    let array = expect_identifier(arena, args[0])
        .ok_or_else(|| shape_error("kds", "array argument must be an identifier"))?;
    let max_size = expect_number_expr(arena, args[1])
        .ok_or_else(|| shape_error("kds", "max-size argument must be an identifier or numeric literal"))?;
    let callback = expect_identifier(arena, args[2])
        .ok_or_else(|| shape_error("kds", "callback argument must be an identifier"))?;
    let verify = args
        .get(3)
        .map(|&a| bool_literal(arena, a).ok_or_else(|| shape_error("kds", "optional verify argument must be a boolean literal")))
        .transpose()?
        .unwrap_or(false);
    let url = args
        .get(4)
        .map(|&a| string_literal(arena, a).ok_or_else(|| shape_error("kds", "optional URL argument must be a string literal")))
        .transpose()?;
    let switch = args
        .get(5)
        .map(|&a| expect_identifier(arena, a).ok_or_else(|| shape_error("kds", "optional switch argument must be an identifier")))
        .transpose()?;
    Ok((
        callback,
        QueryPayload::Kds {
            array,
            max_size,
            verify,
            url,
            switch,
        },
    ))
}
