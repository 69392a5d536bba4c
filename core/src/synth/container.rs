//! Container rewriter (spec §4.E, §4.E.a): replaces a recognized
//! `oracleQuery(...)` call site with environment initialization, optional
//! gas-price setup, and the outbound `oraclize_query` dispatch — wrapped in
//! an `if (<size> < 3)` shortcut when the query is `KP`/`KDS` with a switch
//! function.

use oraclex_ast::{Arena, AssignOp, BinaryOp, Builder, Node, NodeId};

use crate::config::PassConfig;
use crate::query::{Query, QueryPayload};
use crate::synth::clone_leaf;

/// Rewrites `query`'s containing function in place, splicing the
/// replacement statements into whatever block originally held the
/// `oracleQuery(...)` call (spec §4.E steps 1-6).
pub fn rewrite(arena: &mut Arena, cfg: &PassConfig, query: &Query) {
    let var_name = query
        .var_name
        .as_deref()
        .expect("environment synthesis assigns names before container rewriting")
        .to_string();
    let env_name = query
        .env_name
        .as_deref()
        .expect("environment synthesis assigns names before container rewriting")
        .to_string();
    let (container_name, body) = match arena.get(query.container) {
        Node::Function(f) => (f.name.clone(), f.body),
        _ => return,
    };

    let replacement = {
        let mut b = Builder::new(arena);

        let mut replacement = Vec::new();

        // Step 2: `var_name = env_name(args...)`.
        let init_call = build_env_init_call(&mut b, query, &env_name);
        let var_lhs = b.ident(var_name.as_str());
        let init_assign = b.assign(AssignOp::Assign, var_lhs, init_call);
        replacement.push(b.expr_stmt(init_assign));

        // Step 3: optional custom gas price, set before every dispatch.
        if cfg.gas_price() != 0 {
            let price = b.lit_int(cfg.gas_price() as i128);
            let callee = b.ident("oraclize_setCustomGasPrice");
            let call = b.call(callee, vec![price]);
            replacement.push(b.expr_stmt(call));
        }

        // Step 4: the outbound dispatch block.
        let dispatch_stmts = build_dispatch_stmts(&mut b, cfg, query, &var_name, &container_name);

        // Step 5: KP/KDS switch shortcut wraps step 4's block in an if/else.
        if let Some((size_arg, switch)) = shortcut_size_and_switch(query) {
            let size_arg = clone_leaf(&mut b, size_arg);
            let three = b.lit_int(3);
            let cond = b.binary(BinaryOp::Lt, size_arg, three);
            let then_stmts = build_switch_then(&mut b, cfg, query, switch);
            let then_block = b.block(then_stmts);
            let mut else_stmts = build_switch_else_event(&mut b, cfg, query);
            else_stmts.extend(dispatch_stmts);
            let else_block = b.block(else_stmts);
            replacement.push(b.if_stmt(cond, then_block, Some(else_block)));
        } else {
            replacement.extend(dispatch_stmts);
        }

        replacement
    };

    // Step 1 + 6: remove the original call statement and splice the
    // replacement in at the same position, wherever it actually lives
    // (the containing block, or a nested if/for body).
    if let Some((block_id, idx)) = find_slot(arena, body, query.call_stmt) {
        if let Node::Block(block) = arena.get_mut(block_id) {
            block.statements.splice(idx..=idx, replacement);
        }
    }
}

fn find_slot(arena: &Arena, stmt: NodeId, target: NodeId) -> Option<(NodeId, usize)> {
    match arena.get(stmt) {
        Node::Block(block) => {
            for (i, &s) in block.statements.iter().enumerate() {
                if s == target {
                    return Some((stmt, i));
                }
                if let Some(found) = find_slot(arena, s, target) {
                    return Some(found);
                }
            }
            None
        }
        Node::If(if_stmt) => find_slot(arena, if_stmt.then_branch, target)
            .or_else(|| if_stmt.else_branch.and_then(|e| find_slot(arena, e, target))),
        Node::For(for_stmt) => find_slot(arena, for_stmt.body, target),
        _ => None,
    }
}

/// The verification inputs for a kind, in struct-field/source order:
/// `Sqrt` -> `[number]`, `ThreeSum` -> `[array, sum]`, `Kp` -> `[array,
/// path_len, max_weight]`, `Kds` -> `[array, max_size]`. Used both as the
/// tail of the environment constructor call when `verify` is set and as the
/// switch function's arguments regardless of `verify` — each call builds
/// fresh copies via [`clone_leaf`] since both call sites may run for the
/// same query.
fn verify_inputs(b: &mut Builder<'_>, query: &Query) -> Vec<NodeId> {
    match &query.payload {
        QueryPayload::Sqrt { number, .. } => vec![clone_leaf(b, *number)],
        QueryPayload::ThreeSum { array, sum, .. } => vec![clone_leaf(b, *array), clone_leaf(b, *sum)],
        QueryPayload::Kp {
            array,
            path_len,
            max_weight,
            ..
        } => vec![
            clone_leaf(b, *array),
            clone_leaf(b, *path_len),
            clone_leaf(b, *max_weight),
        ],
        QueryPayload::Kds { array, max_size, .. } => vec![clone_leaf(b, *array), clone_leaf(b, *max_size)],
        _ => Vec::new(),
    }
}

fn build_env_init_call(b: &mut Builder<'_>, query: &Query, env_name: &str) -> NodeId {
    let mut args = Vec::new();

    if let QueryPayload::Data { urls } = &query.payload {
        if urls.len() > 1 {
            let url_items: Vec<NodeId> = urls.iter().map(|u| b.lit_string(u.as_str())).collect();
            args.push(b.tuple(url_items));
            let empty_items: Vec<NodeId> = urls.iter().map(|_| b.lit_string("")).collect();
            args.push(b.tuple(empty_items));
            args.push(b.lit_int(0));
        }
    }

    let zero = b.lit_int(0);
    let bytes32_cast = b.ident("bytes32");
    args.push(b.call(bytes32_cast, vec![zero]));

    if query.payload.verifies() {
        args.extend(verify_inputs(b, query));
    }

    let callee = b.ident(env_name);
    b.call(callee, args)
}

fn prefix_for(query: &Query) -> String {
    query
        .payload
        .url_override()
        .map(str::to_string)
        .unwrap_or_else(|| query.kind().default_url().unwrap_or_default().to_string())
}

/// Builds the second argument to `oraclize_query` per spec §4.E.a.
fn build_url_expr(b: &mut Builder<'_>, query: &Query, var_name: &str) -> NodeId {
    match &query.payload {
        QueryPayload::Data { urls } => {
            if urls.len() == 1 {
                b.lit_string(urls[0].as_str())
            } else {
                let v = b.ident(var_name);
                let urls_m = b.member_access(v, "urls");
                let v = b.ident(var_name);
                let index_m = b.member_access(v, "index");
                b.index_access(urls_m, index_m)
            }
        }
        QueryPayload::Min { array, .. } | QueryPayload::Sort { array, .. } | QueryPayload::Apsp { array, .. } => {
            let prefix = prefix_for(query);
            let array = clone_leaf(b, *array);
            let sep = b.lit_string("/");
            let prefix_lit = b.lit_string(prefix.as_str());
            let callee = b.ident("arrayToStringWithPrefix");
            b.call(callee, vec![array, sep, prefix_lit])
        }
        QueryPayload::ThreeSum { array, sum, .. } => {
            let prefix = prefix_for(query);
            let sum = clone_leaf(b, *sum);
            let array = clone_leaf(b, *array);
            let sep = b.lit_string("/");
            let prefix_lit = b.lit_string(prefix.as_str());
            let callee = b.ident("uintAndArrayToStringWithPrefix");
            b.call(callee, vec![sum, array, sep, prefix_lit])
        }
        QueryPayload::Sqrt { number, .. } => {
            let prefix = prefix_for(query);
            let number = clone_leaf(b, *number);
            let prefix_lit = b.lit_string(prefix.as_str());
            let callee = b.ident("uintToStringWithPrefix");
            b.call(callee, vec![number, prefix_lit])
        }
        QueryPayload::Kp {
            array,
            path_len,
            max_weight,
            ..
        } => {
            let prefix = prefix_for(query);
            let path_len = clone_leaf(b, *path_len);
            let max_weight = clone_leaf(b, *max_weight);
            let array = clone_leaf(b, *array);
            let sep = b.lit_string("/");
            let prefix_lit = b.lit_string(prefix.as_str());
            let callee = b.ident("uintsAndArrayToStringWithPrefix");
            b.call(callee, vec![path_len, max_weight, array, sep, prefix_lit])
        }
        QueryPayload::Kds { array, max_size, .. } => {
            let prefix = prefix_for(query);
            let max_size = clone_leaf(b, *max_size);
            let array = clone_leaf(b, *array);
            let sep = b.lit_string("/");
            let prefix_lit = b.lit_string(prefix.as_str());
            let callee = b.ident("uintAndArrayToStringWithPrefix");
            b.call(callee, vec![max_size, array, sep, prefix_lit])
        }
    }
}

fn build_dispatch_stmts(
    b: &mut Builder<'_>,
    cfg: &PassConfig,
    query: &Query,
    var_name: &str,
    container_name: &str,
) -> Vec<NodeId> {
    let mut stmts = Vec::new();

    let url_expr = build_url_expr(b, query, var_name);
    let mut query_args = vec![b.lit_string("URL"), url_expr];
    if cfg.gas_limit() != 0 {
        query_args.push(b.lit_int(cfg.gas_limit() as i128));
    }
    let callee = b.ident("oraclize_query");
    let call = b.call(callee, query_args);
    let lhs = {
        let v = b.ident(var_name);
        b.member_access(v, "queryId")
    };
    let assign = b.assign(AssignOp::Assign, lhs, call);
    stmts.push(b.expr_stmt(assign));

    if cfg.contract_debug() {
        let v = b.ident(var_name);
        let qid = b.member_access(v, "queryId");
        let kind_lit = b.lit_string(query.kind().name());
        let url_expr = build_url_expr(b, query, var_name);
        let callee = b.ident("OraclizeEvent");
        let call = b.call(callee, vec![qid, kind_lit, url_expr]);
        stmts.push(b.expr_stmt(call));

        let v = b.ident(var_name);
        let qid = b.member_access(v, "queryId");
        let label = b.lit_string("function");
        let fn_name = b.lit_string(container_name);
        let callee = b.ident("OraclizeEvent");
        let call = b.call(callee, vec![qid, label, fn_name]);
        stmts.push(b.expr_stmt(call));
    }

    stmts
}

/// `Some((size_arg, switch))` iff the query is `KP`/`KDS` and carries a
/// switch identifier (spec §4.E step 5) — the size argument is the
/// path-length for `KP` and the max-size for `KDS`.
fn shortcut_size_and_switch(query: &Query) -> Option<(NodeId, NodeId)> {
    match &query.payload {
        QueryPayload::Kp {
            path_len,
            switch: Some(switch),
            ..
        } => Some((*path_len, *switch)),
        QueryPayload::Kds {
            max_size,
            switch: Some(switch),
            ..
        } => Some((*max_size, *switch)),
        _ => None,
    }
}

/// The switch shortcut's else-branch gets the same `OraclizeEvent(bytes32(0),
/// kind, "oraclize")` marker the then-branch gets (tagged `"switch"`),
/// emitted just before the normal dispatch statements.
fn build_switch_else_event(b: &mut Builder<'_>, cfg: &PassConfig, query: &Query) -> Vec<NodeId> {
    if !cfg.contract_debug() {
        return Vec::new();
    }
    let zero = b.lit_int(0);
    let bytes32_cast = b.ident("bytes32");
    let zero_id = b.call(bytes32_cast, vec![zero]);
    let kind_lit = b.lit_string(query.kind().name());
    let what = b.lit_string("oraclize");
    let callee = b.ident("OraclizeEvent");
    let call = b.call(callee, vec![zero_id, kind_lit, what]);
    vec![b.expr_stmt(call)]
}

fn build_switch_then(b: &mut Builder<'_>, cfg: &PassConfig, query: &Query, switch: NodeId) -> Vec<NodeId> {
    let mut stmts = Vec::new();

    if cfg.contract_debug() {
        let zero = b.lit_int(0);
        let bytes32_cast = b.ident("bytes32");
        let zero_id = b.call(bytes32_cast, vec![zero]);
        let kind_lit = b.lit_string(query.kind().name());
        let what = b.lit_string("switch");
        let callee = b.ident("OraclizeEvent");
        let call = b.call(callee, vec![zero_id, kind_lit, what]);
        stmts.push(b.expr_stmt(call));
    }

    let args = verify_inputs(b, query);
    let switch = clone_leaf(b, switch);
    let switch_call = b.call(switch, args);
    let callback = clone_leaf(b, query.callback);
    let cb_call = b.call(callback, vec![switch_call]);
    stmts.push(b.expr_stmt(cb_call));

    stmts
}
