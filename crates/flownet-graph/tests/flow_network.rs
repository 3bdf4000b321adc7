use flownet_core::GraphError;
use flownet_graph::{FlowGraph, FlowProperties};

#[test]
fn new_vertices_start_flat() {
    let mut network = FlowGraph::default();
    let v = network.add_vertex();
    assert_eq!(network.height(v).unwrap(), 0);
    assert_eq!(network.excess(v).unwrap(), 0.0);
    assert!(network.source().is_none());
    assert!(network.sink().is_none());
}

#[test]
fn arcs_store_values_verbatim() {
    let mut network = FlowGraph::default();
    let a = network.add_vertex();
    let b = network.add_vertex();
    assert!(network.add_edge(a, b, 7.5, 5.0).unwrap());

    assert_eq!(network.capacity(a, b).unwrap(), 5.0);
    assert_eq!(network.flow(a, b).unwrap(), 7.5);
    assert_eq!(network.residual(a, b).unwrap(), -2.5);

    network.set_flow(a, b, 1.0).unwrap();
    network.set_capacity(a, b, 4.0).unwrap();
    let arc = network.arc(a, b).unwrap();
    assert_eq!((arc.flow, arc.capacity, arc.residual()), (1.0, 4.0, 3.0));
}

#[test]
fn add_edge_reports_rejections_as_false() {
    let mut network = FlowGraph::default();
    let a = network.add_vertex();
    let b = network.add_vertex();
    let gone = network.add_vertex();
    network.remove_vertex(gone).unwrap();

    assert!(network.add_edge(a, b, 0.0, 1.0).unwrap());
    assert!(!network.add_edge(a, b, 0.0, 9.0).unwrap());
    assert_eq!(network.capacity(a, b).unwrap(), 1.0);
    assert!(!network.add_edge(a, a, 0.0, 1.0).unwrap());
    assert!(!network.add_edge(a, gone, 0.0, 1.0).unwrap());
    assert!(network.add_edge(b, a, 0.0, 1.0).unwrap());
    assert_eq!(network.num_edges(), 2);
}

#[test]
fn reverse_arcs_can_be_forbidden() {
    let mut network = FlowGraph::new(FlowProperties::default().without_reverse_edges());
    let a = network.add_vertex();
    let b = network.add_vertex();
    assert!(network.add_edge(a, b, 0.0, 1.0).unwrap());
    assert!(!network.add_edge(b, a, 0.0, 1.0).unwrap());
    assert_eq!(network.num_edges(), 1);

    network.remove_edge(a, b).unwrap();
    assert!(network.add_edge(b, a, 0.0, 1.0).unwrap());
}

#[test]
fn foreign_vertices_are_a_hard_error() {
    let mut left = FlowGraph::default();
    let mut right = FlowGraph::default();
    let a = left.add_vertex();
    let b = right.add_vertex();
    assert!(matches!(
        left.add_edge(a, b, 0.0, 1.0),
        Err(GraphError::VertexNotInGraph(_))
    ));
    assert!(matches!(
        left.set_source(b),
        Err(GraphError::VertexNotInGraph(_))
    ));
}

#[test]
fn terminals_must_be_live_and_are_cleared_on_removal() {
    let mut network = FlowGraph::default();
    let s = network.add_vertex();
    let t = network.add_vertex();
    network.set_source(s).unwrap();
    network.set_sink(t).unwrap();
    assert_eq!(network.source(), Some(s));
    assert_eq!(network.sink(), Some(t));

    network.remove_vertex(t).unwrap();
    assert_eq!(network.sink(), None);
    assert!(matches!(
        network.set_sink(t),
        Err(GraphError::VertexNotFound(_))
    ));
    assert_eq!(network.source(), Some(s));
}

#[test]
fn vertex_labels_are_mutable() {
    let mut network = FlowGraph::default();
    let v = network.add_vertex();
    network.set_height(v, 4).unwrap();
    network.set_excess(v, -1.5).unwrap();
    let view = network.vertices().next().unwrap();
    assert_eq!((view.id, view.height, view.excess), (v, 4, -1.5));
}

#[test]
fn missing_arcs_are_reported() {
    let mut network = FlowGraph::default();
    let a = network.add_vertex();
    let b = network.add_vertex();
    assert!(matches!(
        network.capacity(a, b),
        Err(GraphError::EdgeNotFound(_))
    ));
    assert!(matches!(
        network.set_flow(a, b, 1.0),
        Err(GraphError::EdgeNotFound(_))
    ));
    assert!(network.remove_edge(a, b).is_err());
}

#[test]
fn removing_a_vertex_drops_its_arcs() {
    let mut network = FlowGraph::default();
    let v: Vec<_> = (0..4).map(|_| network.add_vertex()).collect();
    network.add_edge(v[0], v[1], 0.0, 1.0).unwrap();
    network.add_edge(v[1], v[2], 0.0, 1.0).unwrap();
    network.add_edge(v[2], v[1], 0.0, 1.0).unwrap();
    network.add_edge(v[2], v[3], 0.0, 1.0).unwrap();

    network.remove_vertex(v[1]).unwrap();
    assert_eq!(network.num_edges(), 1);
    let arcs: Vec<_> = network.arcs().map(|arc| (arc.from, arc.to)).collect();
    assert_eq!(arcs, vec![(v[2], v[3])]);
    assert_eq!(network.neighbors(v[0]).unwrap().count(), 0);
}
