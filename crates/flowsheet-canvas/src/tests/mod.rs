mod domain;
mod layout;
mod store;

use flowsheet_core::{
    CanonicalEdge, CanonicalNode, DiagramCanonical, DiagramType, EdgeType, NodeType, Nozzle,
    NozzleSide, Position, PropertyValue,
};

/// An engine that always fails, for exercising the absorbed-failure path.
pub(crate) struct FailingEngine;

impl crate::LayoutEngine for FailingEngine {
    fn layout(
        &self,
        _graph: &beluga::Graph,
        _options: &beluga::LayoutOptions,
    ) -> beluga::Result<beluga::LayoutResult> {
        Err(beluga::Error::UnknownEndpoint {
            edge_id: "e".to_string(),
            endpoint: "simulated".to_string(),
        })
    }
}

/// Pump feeding a gate valve through one process line, with enough metadata
/// to make lossy conversion visible.
pub(crate) fn pump_and_valve() -> DiagramCanonical {
    let mut diagram = DiagramCanonical::new("Unit 100", DiagramType::Pid);
    diagram.id = Some("d-1".to_string());

    let mut pump = CanonicalNode::new(
        NodeType::Equipment,
        "centrifugal_pump",
        Position::new(10.0, 20.0),
    );
    pump.id = "pump".to_string();
    pump.tag = "P-101".to_string();
    pump.description = Some("feed pump".to_string());
    pump.properties
        .insert("duty".to_string(), PropertyValue::from("continuous"));
    pump.nozzles = vec![
        Nozzle {
            id: "pump-suction".to_string(),
            label: "suction".to_string(),
            side: NozzleSide::Left,
            offset: 0.5,
        },
        Nozzle {
            id: "pump-discharge".to_string(),
            label: "discharge".to_string(),
            side: NozzleSide::Right,
            offset: 0.5,
        },
    ];

    let mut valve = CanonicalNode::new(NodeType::Valve, "gate_valve", Position::new(240.0, 20.0));
    valve.id = "valve".to_string();
    valve.tag = "XV-101".to_string();

    let mut line = CanonicalEdge::new(EdgeType::Process, "pump", "valve");
    line.id = "line-1".to_string();
    line.line_number = Some("6\"-PLA-001-A2A".to_string());
    line.pipe_size = Some("6\"".to_string());
    line.pipe_class = Some("A2A".to_string());
    line.properties
        .insert("fluid".to_string(), PropertyValue::from("water"));

    diagram.nodes = vec![pump, valve];
    diagram.edges = vec![line];
    diagram
}
