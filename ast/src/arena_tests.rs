use super::*;
use crate::loc::SourceLoc;
use crate::node::{Identifier, LiteralValue};

fn ident(name: &str) -> Node {
    Node::Identifier(Identifier {
        loc: SourceLoc::synthetic(),
        doc: String::new(),
        name: name.to_string(),
    })
}

#[test]
fn push_returns_distinct_ids() {
    let mut arena = Arena::new();
    let a = arena.push(ident("a"));
    let b = arena.push(ident("b"));
    assert_ne!(a, b);
    assert_eq!(arena.len(), 2);
}

#[test]
fn get_returns_the_pushed_node() {
    let mut arena = Arena::new();
    let id = arena.push(ident("x"));
    match arena.get(id) {
        Node::Identifier(i) => assert_eq!(i.name, "x"),
        other => panic!("unexpected node {other:?}"),
    }
}

#[test]
fn get_mut_allows_in_place_rewrite() {
    let mut arena = Arena::new();
    let id = arena.push(ident("old"));
    if let Node::Identifier(i) = arena.get_mut(id) {
        i.name = "new".to_string();
    }
    assert_eq!(arena.get(id).as_identifier().unwrap().name, "new");
}

#[test]
fn empty_arena_reports_empty() {
    let arena = Arena::new();
    assert!(arena.is_empty());
    assert_eq!(arena.len(), 0);
}

#[test]
fn literal_accessor_roundtrips() {
    let mut arena = Arena::new();
    let id = arena.push(Node::Literal(crate::node::Literal {
        loc: SourceLoc::synthetic(),
        doc: String::new(),
        value: LiteralValue::Int(42),
    }));
    assert_eq!(
        arena.get(id).as_literal().unwrap().value,
        LiteralValue::Int(42)
    );
    assert!(arena.get(id).as_identifier().is_none());
}
