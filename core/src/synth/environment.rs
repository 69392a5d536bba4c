//! Environment synthesizer (spec §4.D): assigns each [`Query`] its
//! `OEnv<i>`/`_oEnv<i>` names, builds the per-query struct and private state
//! variable, and prepends the single contract-level `OraclizeEvent` event.
//!
//! Inserting a struct at position `i` and a variable at position `2i+1` for
//! every query in order collapses to a fixed shape once all insertions are
//! played out: the final subnode order is always `[event, struct0..structN,
//! var0..varN, <original subnodes>]`, independent of what the original
//! subnodes were. We build that shape directly rather than simulating the
//! positional inserts one at a time.

use oraclex_ast::{Builder, ElementaryTypeKind, Node, NodeId, Visibility};

use crate::config::PassConfig;
use crate::query::{Query, QueryPayload};

/// Runs environment synthesis for every query recognized in `contract`,
/// mutating `contract`'s subnode list in place. Assigns `env_name`/`var_name`
/// on each `Query` as a side effect (spec §4.D step 1).
pub fn synthesize(arena: &mut oraclex_ast::Arena, cfg: &PassConfig, contract: NodeId, queries: &mut [Query]) {
    for (i, query) in queries.iter_mut().enumerate() {
        query.assign_names(i);
    }

    let mut structs = Vec::with_capacity(queries.len());
    let mut vars = Vec::with_capacity(queries.len());
    {
        let mut b = Builder::new(arena);
        for query in queries.iter() {
            let env_name = query.env_name.clone().expect("names assigned above");
            let var_name = query.var_name.clone().expect("names assigned above");
            structs.push(build_struct(&mut b, cfg, query, &env_name));
            vars.push(build_state_var(&mut b, &env_name, &var_name));
        }
    }
    let event = build_event(arena);

    let Node::Contract(c) = arena.get_mut(contract) else {
        return;
    };
    let original = std::mem::take(&mut c.subnodes);
    let mut subnodes = Vec::with_capacity(1 + structs.len() + vars.len() + original.len());
    subnodes.push(event);
    subnodes.extend(structs);
    subnodes.extend(vars);
    subnodes.extend(original);
    c.subnodes = subnodes;
}

fn build_struct(b: &mut Builder<'_>, cfg: &PassConfig, query: &Query, env_name: &str) -> NodeId {
    let mut members = Vec::new();

    if let QueryPayload::Data { urls } = &query.payload {
        if urls.len() > 1 {
            let n = urls.len() as i128;
            let string_ty = b.elementary_type(ElementaryTypeKind::String);
            let len = b.lit_int(n);
            let urls_ty = b.array_type(string_ty, Some(len));
            members.push(b.var_decl(Some(urls_ty), "urls", Visibility::Internal));

            let string_ty = b.elementary_type(ElementaryTypeKind::String);
            let len = b.lit_int(n);
            let ret_vals_ty = b.array_type(string_ty, Some(len));
            members.push(b.var_decl(Some(ret_vals_ty), "retVals", Visibility::Internal));

            let index_ty = b.elementary_type(ElementaryTypeKind::UintN(8));
            members.push(b.var_decl(Some(index_ty), "index", Visibility::Internal));
        }
    }

    let bytes32_ty = b.elementary_type(ElementaryTypeKind::FixedBytes(32));
    members.push(b.var_decl(Some(bytes32_ty), "queryId", Visibility::Internal));

    if query.payload.verifies() {
        match &query.payload {
            QueryPayload::Sqrt { .. } => {
                let ty = b.elementary_type(ElementaryTypeKind::Uint);
                members.push(b.var_decl(Some(ty), "sqrt", Visibility::Internal));
            }
            QueryPayload::ThreeSum { .. } => {
                let x = cfg.threesum_uint_x();
                let uintx = b.elementary_type(ElementaryTypeKind::UintN(x));
                let nums_ty = b.array_type(uintx, None);
                members.push(b.var_decl(Some(nums_ty), "nums", Visibility::Internal));
                let sum_ty = b.elementary_type(ElementaryTypeKind::UintN(2 * x));
                members.push(b.var_decl(Some(sum_ty), "sum", Visibility::Internal));
            }
            QueryPayload::Kp { .. } => {
                let x = cfg.kp_uint_x();
                let uintx = b.elementary_type(ElementaryTypeKind::UintN(x));
                let w_ty = b.array_type(uintx, None);
                members.push(b.var_decl(Some(w_ty), "w", Visibility::Internal));
                let k_ty = b.elementary_type(ElementaryTypeKind::Uint);
                members.push(b.var_decl(Some(k_ty), "k", Visibility::Internal));
                let big_w_ty = b.elementary_type(ElementaryTypeKind::Uint);
                members.push(b.var_decl(Some(big_w_ty), "W", Visibility::Internal));
            }
            QueryPayload::Kds { .. } => {
                let x = cfg.kds_uint_x();
                let uintx = b.elementary_type(ElementaryTypeKind::UintN(x));
                let m_ty = b.array_type(uintx, None);
                members.push(b.var_decl(Some(m_ty), "m", Visibility::Internal));
                let k_ty = b.elementary_type(ElementaryTypeKind::Uint);
                members.push(b.var_decl(Some(k_ty), "k", Visibility::Internal));
            }
            _ => {}
        }
    }

    b.struct_def(env_name, members)
}

fn build_state_var(b: &mut Builder<'_>, env_name: &str, var_name: &str) -> NodeId {
    let ty = b.ident(env_name);
    b.var_decl(Some(ty), var_name, Visibility::Private)
}

fn build_event(arena: &mut oraclex_ast::Arena) -> NodeId {
    let mut b = Builder::new(arena);
    let bytes32_ty = b.elementary_type(ElementaryTypeKind::FixedBytes(32));
    let query_id = b.var_decl(Some(bytes32_ty), "queryId", Visibility::Internal);
    let string_ty = b.elementary_type(ElementaryTypeKind::String);
    let kind = b.var_decl(Some(string_ty), "type", Visibility::Internal);
    let string_ty = b.elementary_type(ElementaryTypeKind::String);
    let what = b.var_decl(Some(string_ty), "what", Visibility::Internal);
    let params = b.params(vec![query_id, kind, what]);
    b.event_def("OraclizeEvent", params)
}
