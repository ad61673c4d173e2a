use super::{FailingEngine, pump_and_valve};
use crate::*;
use flowsheet_core::{DiagramCanonical, DiagramType, NodeType, Position};
use futures::executor::block_on;

#[test]
fn add_node_requires_a_loaded_document() {
    let mut store = DomainStore::new();
    let refused = store.add_node(NewNode::new(
        NodeType::Equipment,
        "centrifugal_pump",
        Position::default(),
    ));
    assert_eq!(refused, None);
}

#[test]
fn add_node_tags_against_the_canonical_document() {
    let mut store = DomainStore::new();
    store.set_canonical(pump_and_valve());

    let id = store
        .add_node(NewNode::new(
            NodeType::Equipment,
            "centrifugal_pump",
            Position::new(50.0, 50.0),
        ))
        .unwrap();

    let diagram = store.canonical().unwrap();
    let added = diagram.node_by_id(&id).unwrap();
    // P-101 is taken by the existing pump.
    assert_eq!(added.tag, "P-102");
    assert_eq!(diagram.nodes.len(), 3);
}

#[test]
fn remove_node_cascades_through_the_document() {
    let mut store = DomainStore::new();
    store.set_canonical(pump_and_valve());

    assert!(store.remove_node("pump"));
    let diagram = store.canonical().unwrap();
    assert_eq!(diagram.nodes.len(), 1);
    assert!(diagram.edges.is_empty());
    assert!(!store.remove_node("pump"));
}

#[test]
fn apply_layout_updates_and_returns_the_document() {
    let mut store = DomainStore::new();
    store.set_canonical(pump_and_valve());

    let positioned = block_on(store.apply_layout()).unwrap();
    assert_eq!(positioned, *store.canonical().unwrap());
    let pump = positioned.node_by_id("pump").unwrap();
    let valve = positioned.node_by_id("valve").unwrap();
    assert!(pump.position.x < valve.position.x);
}

#[test]
fn apply_layout_without_a_document_is_none() {
    let mut store = DomainStore::new();
    assert_eq!(block_on(store.apply_layout()), None);
}

#[test]
fn layout_failure_keeps_the_document_as_is() {
    let mut store = DomainStore::with_engine(Box::new(FailingEngine));
    let diagram = pump_and_valve();
    store.set_canonical(diagram.clone());

    let result = block_on(store.apply_layout()).unwrap();
    assert_eq!(result, diagram);
    assert_eq!(store.canonical(), Some(&diagram));
}

#[test]
fn clear_empties_contents_but_keeps_the_shell() {
    let mut store = DomainStore::new();
    store.set_canonical(pump_and_valve());
    store.clear();

    let diagram = store.canonical().unwrap();
    assert!(diagram.nodes.is_empty());
    assert!(diagram.edges.is_empty());
    assert_eq!(diagram.name, "Unit 100");
    assert_eq!(diagram.diagram_type, DiagramType::Pid);
}

#[test]
fn take_canonical_transfers_ownership() {
    let mut store = DomainStore::new();
    store.set_canonical(DiagramCanonical::new("d", DiagramType::Bfd));
    let taken = store.take_canonical().unwrap();
    assert_eq!(taken.diagram_type, DiagramType::Bfd);
    assert!(store.canonical().is_none());
}
