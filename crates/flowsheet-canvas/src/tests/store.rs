use super::{FailingEngine, pump_and_valve};
use crate::*;
use flowsheet_core::{DiagramType, EdgeType, NodeType, Position};
use futures::executor::block_on;
use serde_json::json;

fn store_with_two_nodes() -> (CanvasStore, String, String) {
    let mut store = CanvasStore::new();
    let pump = store.add_node(NewNode::new(
        NodeType::Equipment,
        "centrifugal_pump",
        Position::new(0.0, 0.0),
    ));
    let valve = store.add_node(NewNode::new(
        NodeType::Valve,
        "gate_valve",
        Position::new(200.0, 0.0),
    ));
    (store, pump, valve)
}

#[test]
fn dropped_nodes_get_sequential_tags_and_the_generic_render_kind() {
    let (store, pump, valve) = store_with_two_nodes();
    let pump = store.nodes().iter().find(|n| n.id == pump).unwrap();
    let valve = store.nodes().iter().find(|n| n.id == valve).unwrap();

    assert_eq!(pump.payload.tag, "P-101");
    assert_eq!(valve.payload.tag, "XV-101");
    assert_eq!(pump.display.label, "P-101");
    assert_eq!(pump.kind, "pid");
    assert_eq!(valve.kind, "pid");
}

#[test]
fn fittings_keep_their_own_render_kind() {
    let mut store = CanvasStore::new();
    let tee = store.add_node(NewNode::new(NodeType::Fitting, "tee", Position::default()));
    let tee = store.nodes().iter().find(|n| n.id == tee).unwrap();
    assert_eq!(tee.kind, "fitting");
}

#[test]
fn equipment_class_overrides_the_tag_and_symbol_class() {
    let mut store = CanvasStore::new();
    let mut new = NewNode::new(NodeType::Equipment, "vessel", Position::default());
    new.equipment_class = Some("vessel_vertical".to_string());
    let id = store.add_node(new);
    let vessel = store.nodes().iter().find(|n| n.id == id).unwrap();
    assert_eq!(vessel.payload.tag, "V-101");
    assert_eq!(vessel.display.symbol, "vessel_vertical");
}

#[test]
fn connect_assigns_a_fresh_id_and_a_style_by_edge_type() {
    let (mut store, pump, valve) = store_with_two_nodes();
    let mut connection = Connection::new(pump.clone(), valve.clone());
    connection.edge_type = EdgeType::SignalElectrical;
    let edge_id = store.connect(connection);

    let edge = store.edges().iter().find(|e| e.id == edge_id).unwrap();
    assert_eq!(edge.source, pump);
    assert_eq!(edge.target, valve);
    assert_eq!(edge.source_handle, "right-source");
    assert!(edge.style.dash_array.is_some());
    assert_eq!(edge.payload.insulation, "N");

    let second = store.connect(Connection::new(valve, pump));
    assert_ne!(edge_id, second);
}

#[test]
fn removing_a_node_cascades_to_exactly_its_edges() {
    let (mut store, pump, valve) = store_with_two_nodes();
    let tee = store.add_node(NewNode::new(NodeType::Fitting, "tee", Position::default()));
    let pump_valve = store.connect(Connection::new(pump.clone(), valve.clone()));
    let valve_tee = store.connect(Connection::new(valve.clone(), tee.clone()));

    assert!(store.remove_node(&valve));
    assert_eq!(store.nodes().len(), 2);
    assert!(store.edges().iter().all(|e| e.id != pump_valve));
    assert!(store.edges().iter().all(|e| e.id != valve_tee));

    // Unrelated edges survive.
    let pump_tee = store.connect(Connection::new(pump, tee));
    assert!(store.edges().iter().any(|e| e.id == pump_tee));
    assert!(!store.remove_node(&valve));
}

#[test]
fn node_changes_move_and_select_without_touching_payloads() {
    let (mut store, pump, _) = store_with_two_nodes();
    store.apply_node_changes(&[
        NodeChange::Position {
            id: pump.clone(),
            position: Position::new(42.0, 7.0),
        },
        NodeChange::Select {
            id: pump.clone(),
            selected: true,
        },
    ]);
    let node = store.nodes().iter().find(|n| n.id == pump).unwrap();
    assert_eq!(node.position, Position::new(42.0, 7.0));
    assert!(node.selected);
    assert_eq!(node.payload.tag, "P-101");
}

#[test]
fn remove_changes_cascade_like_direct_removal() {
    let (mut store, pump, valve) = store_with_two_nodes();
    store.connect(Connection::new(pump.clone(), valve.clone()));
    store.apply_node_changes(&[NodeChange::Remove { id: pump }]);
    assert_eq!(store.nodes().len(), 1);
    assert!(store.edges().is_empty());
}

#[test]
fn load_canonical_value_rejects_malformed_documents_and_keeps_state() {
    let (mut store, _, _) = store_with_two_nodes();
    let before = store.nodes().len();

    store.load_canonical_value(&json!({ "name": "broken", "nodes": "nope" }));
    assert_eq!(store.nodes().len(), before);

    store.load_canonical_value(&json!({
        "canonical_schema_version": 99,
        "name": "future",
        "nodes": [],
        "edges": []
    }));
    assert_eq!(store.nodes().len(), before);
}

#[test]
fn load_canonical_replaces_the_whole_canvas() {
    let (mut store, _, _) = store_with_two_nodes();
    store.load_canonical(&pump_and_valve());
    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.nodes()[0].display.label, "P-101");
}

#[test]
fn to_canonical_round_trips_through_the_store() {
    let mut store = CanvasStore::new();
    let diagram = pump_and_valve();
    store.load_canonical(&diagram);
    let back = store.to_canonical(&ConvertMeta {
        id: diagram.id.clone(),
        name: diagram.name.clone(),
        diagram_type: diagram.diagram_type,
        project_id: None,
        metadata: None,
    });
    assert_eq!(back.canonical_schema_version, 1);
    assert_eq!(back.nodes.len(), 2);
    assert_eq!(back.nodes[0].tag, "P-101");
    assert_eq!(back.edges[0].insulation, "N");
}

#[test]
fn auto_layout_repositions_through_the_bundled_engine() {
    let mut store = CanvasStore::new();
    store.load_canonical(&pump_and_valve());
    block_on(store.apply_auto_layout(&ConvertMeta::named("Unit 100")));

    let pump = store.nodes().iter().find(|n| n.id == "pump").unwrap();
    let valve = store.nodes().iter().find(|n| n.id == "valve").unwrap();
    assert!(pump.position.x < valve.position.x);
}

#[test]
fn auto_layout_failure_leaves_positions_untouched() {
    let mut store = CanvasStore::with_engine(Box::new(FailingEngine));
    store.load_canonical(&pump_and_valve());
    let before: Vec<Position> = store.nodes().iter().map(|n| n.position).collect();

    block_on(store.apply_auto_layout(&ConvertMeta::named("Unit 100")));
    let after: Vec<Position> = store.nodes().iter().map(|n| n.position).collect();
    assert_eq!(before, after);
}

#[test]
fn clear_empties_the_canvas() {
    let (mut store, pump, valve) = store_with_two_nodes();
    store.connect(Connection::new(pump, valve));
    store.clear();
    assert!(store.nodes().is_empty());
    assert!(store.edges().is_empty());
}

// The spec's end-to-end scenario: pump and valve, one process line.
#[test]
fn two_node_scenario_tags_styles_and_defaults() {
    let mut store = CanvasStore::new();
    let pump = store.add_node(NewNode::new(
        NodeType::Equipment,
        "centrifugal_pump",
        Position::new(0.0, 0.0),
    ));
    let valve = store.add_node(NewNode::new(
        NodeType::Valve,
        "gate_valve",
        Position::new(200.0, 0.0),
    ));
    store.connect(Connection::new(pump, valve));

    let tags: Vec<&str> = store
        .nodes()
        .iter()
        .map(|n| n.payload.tag.as_str())
        .collect();
    assert_eq!(tags, ["P-101", "XV-101"]);

    let edge = &store.edges()[0];
    assert_eq!(edge.style.stroke_width, 2.0);
    assert_eq!(edge.style.dash_array, None);

    let canonical = store.to_canonical(&ConvertMeta::named("scenario"));
    assert_eq!(canonical.edges[0].insulation, "N");
    assert_eq!(canonical.diagram_type, DiagramType::Pid);
}
