use oraclex_ast::{Builder, Node, NodeId};

use crate::config::PassConfig;
use crate::query::{Query, QueryPayload};
use crate::synth::environment::synthesize;
use crate::test_utils::{new_arena, single_function_contract};

fn data_query(b: &mut Builder<'_>, container: NodeId, urls: Vec<&str>) -> Query {
    let callback = b.ident("cb");
    let callee = b.ident("oracleQuery");
    let call = b.call(callee, vec![]);
    let stmt = b.expr_stmt(call);
    let payload = QueryPayload::data(urls.into_iter().map(String::from).collect()).unwrap();
    Query::new(callback, container, stmt, payload)
}

#[test]
fn single_query_gets_env0_names_and_struct() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let (_, contract, f) = single_function_contract(&mut b, "C", "f", vec![]);
    let mut queries = vec![data_query(&mut b, f, vec!["https://x/y"])];
    drop(b);

    synthesize(&mut arena, &PassConfig::new(), contract, &mut queries);

    assert_eq!(queries[0].env_name.as_deref(), Some("OEnv0"));
    assert_eq!(queries[0].var_name.as_deref(), Some("_oEnv0"));

    let Node::Contract(c) = arena.get(contract) else { panic!() };
    // event, struct, var, function
    assert_eq!(c.subnodes.len(), 4);
    let Node::Event(ev) = arena.get(c.subnodes[0]) else { panic!("expected event first") };
    assert_eq!(ev.name, "OraclizeEvent");
    let Node::Struct(s) = arena.get(c.subnodes[1]) else { panic!("expected struct second") };
    assert_eq!(s.name, "OEnv0");
    let Node::VarDecl(v) = arena.get(c.subnodes[2]) else { panic!("expected var third") };
    assert_eq!(v.name, "_oEnv0");
    assert_eq!(c.subnodes[3], f);
}

#[test]
fn single_url_data_struct_has_only_query_id() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let (_, contract, f) = single_function_contract(&mut b, "C", "f", vec![]);
    let mut queries = vec![data_query(&mut b, f, vec!["https://x/y"])];
    drop(b);

    synthesize(&mut arena, &PassConfig::new(), contract, &mut queries);

    let Node::Contract(c) = arena.get(contract) else { panic!() };
    let Node::Struct(s) = arena.get(c.subnodes[1]) else { panic!() };
    assert_eq!(s.members.len(), 1);
    let Node::VarDecl(member) = arena.get(s.members[0]) else { panic!() };
    assert_eq!(member.name, "queryId");
}

#[test]
fn multi_url_data_struct_has_urls_ret_vals_index_then_query_id() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let (_, contract, f) = single_function_contract(&mut b, "C", "f", vec![]);
    let mut queries = vec![data_query(&mut b, f, vec!["a", "b", "c"])];
    drop(b);

    synthesize(&mut arena, &PassConfig::new(), contract, &mut queries);

    let Node::Contract(c) = arena.get(contract) else { panic!() };
    let Node::Struct(s) = arena.get(c.subnodes[1]) else { panic!() };
    let names: Vec<&str> = s
        .members
        .iter()
        .map(|&m| match arena.get(m) {
            Node::VarDecl(v) => v.name.as_str(),
            _ => panic!(),
        })
        .collect();
    assert_eq!(names, vec!["urls", "retVals", "index", "queryId"]);
}

#[test]
fn two_queries_produce_structs_then_vars_then_originals() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let (_, contract, f) = single_function_contract(&mut b, "C", "f", vec![]);
    let mut queries = vec![
        data_query(&mut b, f, vec!["a"]),
        data_query(&mut b, f, vec!["b"]),
    ];
    drop(b);

    synthesize(&mut arena, &PassConfig::new(), contract, &mut queries);

    let Node::Contract(c) = arena.get(contract) else { panic!() };
    // event, struct0, struct1, var0, var1, f
    assert_eq!(c.subnodes.len(), 6);
    let kind_of = |id: NodeId| -> &'static str {
        match arena.get(id) {
            Node::Event(_) => "event",
            Node::Struct(_) => "struct",
            Node::VarDecl(_) => "var",
            Node::Function(_) => "fn",
            _ => "other",
        }
    };
    let kinds: Vec<&str> = c.subnodes.iter().map(|&n| kind_of(n)).collect();
    assert_eq!(kinds, vec!["event", "struct", "struct", "var", "var", "fn"]);
    assert_eq!(queries[0].env_name.as_deref(), Some("OEnv0"));
    assert_eq!(queries[1].env_name.as_deref(), Some("OEnv1"));
}

#[test]
fn sqrt_verify_struct_gains_sqrt_member() {
    let mut arena = new_arena();
    let mut b = Builder::new(&mut arena);
    let (_, contract, f) = single_function_contract(&mut b, "C", "f", vec![]);
    let callback = b.ident("cb");
    let number = b.ident("n");
    let callee = b.ident("oracleQuery");
    let call = b.call(callee, vec![]);
    let stmt = b.expr_stmt(call);
    let payload = QueryPayload::Sqrt {
        number,
        verify: true,
        url: None,
        switch: None,
    };
    let mut queries = vec![Query::new(callback, f, stmt, payload)];
    drop(b);

    synthesize(&mut arena, &PassConfig::new(), contract, &mut queries);

    let Node::Contract(c) = arena.get(contract) else { panic!() };
    let Node::Struct(s) = arena.get(c.subnodes[1]) else { panic!() };
    let names: Vec<&str> = s
        .members
        .iter()
        .map(|&m| match arena.get(m) {
            Node::VarDecl(v) => v.name.as_str(),
            _ => panic!(),
        })
        .collect();
    assert_eq!(names, vec!["queryId", "sqrt"]);
}
