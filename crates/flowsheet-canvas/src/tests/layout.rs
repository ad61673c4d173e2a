use super::{FailingEngine, pump_and_valve};
use crate::layout::{LAYER_SPACING, NODE_SPACING, node_dimensions};
use crate::*;
use flowsheet_core::NodeType;
use futures::executor::block_on;

#[test]
fn node_sizes_come_from_the_static_type_table() {
    assert_eq!(node_dimensions(NodeType::Equipment).width, 80.0);
    assert_eq!(node_dimensions(NodeType::Equipment).height, 80.0);
    assert_eq!(node_dimensions(NodeType::Valve).width, 60.0);
    assert_eq!(node_dimensions(NodeType::Instrument).width, 60.0);
    assert_eq!(node_dimensions(NodeType::Fitting).width, 40.0);
}

#[test]
fn nozzle_less_nodes_get_four_default_ports() {
    let diagram = pump_and_valve();
    let graph = build_layout_graph(&diagram);

    // The valve has no nozzles: one synthesized port per side.
    let valve = graph.nodes.iter().find(|n| n.id == "valve").unwrap();
    let mut port_ids: Vec<&str> = valve.ports.iter().map(|p| p.id.as_str()).collect();
    port_ids.sort_unstable();
    assert_eq!(
        port_ids,
        ["valve__bottom", "valve__left", "valve__right", "valve__top"]
    );
}

#[test]
fn nozzles_become_fixed_side_ports() {
    let diagram = pump_and_valve();
    let graph = build_layout_graph(&diagram);

    let pump = graph.nodes.iter().find(|n| n.id == "pump").unwrap();
    assert_eq!(pump.ports.len(), 2);
    let suction = pump.ports.iter().find(|p| p.id == "pump-suction").unwrap();
    assert_eq!(suction.side, beluga::PortSide::West);
    let discharge = pump
        .ports
        .iter()
        .find(|p| p.id == "pump-discharge")
        .unwrap();
    assert_eq!(discharge.side, beluga::PortSide::East);
}

#[test]
fn handle_shaped_ports_translate_to_side_port_names() {
    let mut diagram = pump_and_valve();
    diagram.edges[0].from_port = Some("right-source".to_string());
    diagram.edges[0].to_port = Some("bottom-target".to_string());
    let graph = build_layout_graph(&diagram);
    assert_eq!(graph.edges[0].source, "pump__right");
    assert_eq!(graph.edges[0].target, "valve__bottom");
}

#[test]
fn absent_ports_default_to_right_and_left() {
    let diagram = pump_and_valve();
    let graph = build_layout_graph(&diagram);
    assert_eq!(graph.edges[0].source, "pump__right");
    assert_eq!(graph.edges[0].target, "valve__left");
}

#[test]
fn opaque_nozzle_ids_pass_through_unchanged() {
    let mut diagram = pump_and_valve();
    diagram.edges[0].from_port = Some("pump-discharge".to_string());
    let graph = build_layout_graph(&diagram);
    assert_eq!(graph.edges[0].source, "pump-discharge");
}

#[test]
fn layout_options_carry_the_contract_constants() {
    let options = layout_options();
    assert_eq!(options.direction, beluga::Direction::Right);
    assert_eq!(options.layer_spacing, LAYER_SPACING);
    assert_eq!(options.node_spacing, NODE_SPACING);
    assert_eq!(options.edge_routing, beluga::EdgeRouting::Orthogonal);
    assert_eq!(
        options.node_placement,
        beluga::NodePlacement::NetworkSimplex
    );
    assert_eq!(
        options.port_constraints,
        beluga::PortConstraints::FixedSide
    );
}

#[test]
fn extract_positions_keeps_nodes_missing_from_the_result() {
    let diagram = pump_and_valve();
    let mut result = beluga::LayoutResult::default();
    result
        .positions
        .insert("pump".to_string(), beluga::Point { x: 5.0, y: 6.0 });

    let updated = extract_positions(&diagram, &result);
    assert_eq!(updated.nodes[0].position.x, 5.0);
    assert_eq!(updated.nodes[0].position.y, 6.0);
    // The valve was not in the result: original position retained.
    assert_eq!(updated.nodes[1].position, diagram.nodes[1].position);
}

#[test]
fn apply_layout_places_downstream_nodes_in_later_layers() {
    let diagram = pump_and_valve();
    let positioned = block_on(apply_layout(&diagram, &BelugaEngine));
    let pump = positioned.node_by_id("pump").unwrap();
    let valve = positioned.node_by_id("valve").unwrap();
    assert!(pump.position.x < valve.position.x);
    // Everything else is untouched.
    assert_eq!(positioned.nodes[0].tag, "P-101");
    assert_eq!(positioned.edges, diagram.edges);
}

#[test]
fn apply_layout_failure_returns_the_input_unchanged() {
    let diagram = pump_and_valve();
    let result = block_on(apply_layout(&diagram, &FailingEngine));
    assert_eq!(result, diagram);
}

#[test]
fn apply_layout_on_an_empty_diagram_is_a_no_op() {
    let diagram = flowsheet_core::DiagramCanonical::new("empty", Default::default());
    let result = block_on(apply_layout(&diagram, &FailingEngine));
    assert_eq!(result, diagram);
}
