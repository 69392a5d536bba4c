use oraclex_ast::Builder;

use crate::query::QueryPayload;
use crate::recognize::{recognize, recognize_contract};
use crate::test_utils::{new_arena, oracle_query_call, single_function_contract};

#[test]
fn single_url_data_query_is_recognized() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let url = b.lit_string("https://x/y");
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "data", vec![url, cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert_eq!(queries.len(), 1);
    match &queries[0].payload {
        QueryPayload::Data { urls } => assert_eq!(urls, &["https://x/y".to_string()]),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn multi_url_data_query_counts_urls() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let u0 = b.lit_string("a");
    let u1 = b.lit_string("b");
    let u2 = b.lit_string("c");
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "data", vec![u0, u1, u2, cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert_eq!(queries[0].query_size(), 3);
}

#[test]
fn unknown_kind_is_silently_ignored() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "foo", vec![cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert!(queries.is_empty());
}

#[test]
fn too_few_args_to_identify_kind_is_silently_ignored() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let call = oracle_query_call(&mut b, "data", vec![]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert!(queries.is_empty());
}

#[test]
fn data_with_zero_urls_but_enough_args_is_fatal() {
    // "data" with only a callback (no URL) still has >= 2 total args after
    // kind (namely just the callback), so the kind IS identified, and the
    // split-at-last-arg leaves zero URL literals: a shape error, not silent.
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "data", vec![cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let err = recognize_contract(&arena, contract).unwrap_err();
    assert_eq!(err.kind, "data");
}

#[test]
fn kp_full_shape_with_verify_and_switch_is_recognized() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let arr = b.ident("arr");
    let path_len = b.lit_int(5);
    let max_weight = b.lit_int(100);
    let cb = b.ident("cb");
    let verify = b.lit_bool(true);
    let url = b.lit_string("");
    let switch = b.ident("switchFn");
    let call = oracle_query_call(
        &mut b,
        "kp",
        vec![arr, path_len, max_weight, cb, verify, url, switch],
    );
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert_eq!(queries.len(), 1);
    match &queries[0].payload {
        QueryPayload::Kp { verify, switch, .. } => {
            assert!(*verify);
            assert!(switch.is_some());
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn kp_wrong_arity_is_fatal() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let arr = b.ident("arr");
    let cb = b.ident("cb");
    // Missing path-length and max-weight: only 2 args after kind, KP needs >= 4.
    let call = oracle_query_call(&mut b, "kp", vec![arr, cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let err = recognize_contract(&arena, contract).unwrap_err();
    assert_eq!(err.kind, "kp");
}

#[test]
fn sort_verify_flag_is_stored_even_though_never_honored() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let arr = b.ident("arr");
    let cb = b.ident("cb");
    let verify = b.lit_bool(true);
    let call = oracle_query_call(&mut b, "sort", vec![arr, cb, verify]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    match &queries[0].payload {
        QueryPayload::Sort { verify, .. } => assert!(*verify),
        other => panic!("unexpected payload {other:?}"),
    }
    assert!(!queries[0].payload.verifies());
}

#[test]
fn calls_to_other_callees_are_not_recognized() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let callee = b.ident("notOracleQuery");
    let kind = b.lit_string("data");
    let cb = b.ident("cb");
    let call = b.call(callee, vec![kind, cb]);
    let stmt = b.expr_stmt(call);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert!(queries.is_empty());
}

#[test]
fn nested_calls_inside_if_and_for_are_found() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let url = b.lit_string("https://x/y");
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "data", vec![url, cb]);
    let inner_stmt = b.expr_stmt(call);
    let inner_block = b.block(vec![inner_stmt]);
    let cond = b.lit_bool(true);
    let if_stmt = b.if_stmt(cond, inner_block, None);
    let (_, contract, _) = single_function_contract(&mut b, "C", "f", vec![if_stmt]);

    let queries = recognize_contract(&arena, contract).unwrap();
    assert_eq!(queries.len(), 1);
}

#[test]
fn ignore_list_contracts_are_skipped_by_source_unit_walk() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let url = b.lit_string("https://x/y");
    let cb = b.ident("cb");
    let call = oracle_query_call(&mut b, "data", vec![url, cb]);
    let stmt = b.expr_stmt(call);
    let (source_unit, _, _) = single_function_contract(&mut b, "usingOraclize", "f", vec![stmt]);

    let per_contract = recognize(&arena, source_unit).unwrap();
    assert!(per_contract.is_empty());
}
