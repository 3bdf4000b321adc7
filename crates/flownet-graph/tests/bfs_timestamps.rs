use flownet_core::VertexId;
use flownet_graph::{bfs, FlowGraph, Graph, GraphProperties};

#[test]
fn star_inside_large_sparse_graph() {
    let mut graph: Graph = Graph::new(GraphProperties::undirected());
    let ids: Vec<VertexId> = (0..100_000).map(|_| graph.add_vertex()).collect();
    for leaf in &ids[1..8] {
        graph.add_edge(ids[0], *leaf).unwrap();
    }

    let result = bfs(&graph).unwrap();
    assert_eq!(result.len(), 100_000);

    let hub = result.get(ids[0]).unwrap();
    for leaf in &ids[1..8] {
        let visit = result.get(*leaf).unwrap();
        assert!(hub.discovery < visit.discovery);
        assert!(visit.discovery < hub.finish);
        assert_eq!(visit.parent, Some(ids[0]));
    }
    assert_eq!(result.roots().len(), 100_000 - 7);
    assert_eq!(result.ticks(), 200_000);
}

#[test]
fn every_vertex_finishes_after_discovery_and_after_its_parent() {
    let mut graph: Graph = Graph::new(GraphProperties::directed());
    let v: Vec<VertexId> = (0..8).map(|_| graph.add_vertex()).collect();
    for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (5, 6), (6, 5), (7, 0)] {
        graph.add_edge(v[a], v[b]).unwrap();
    }

    let result = bfs(&graph).unwrap();
    assert_eq!(result.len(), 8);
    let mut ticks = Vec::new();
    for (vertex, visit) in result.iter() {
        assert!(visit.finish > visit.discovery, "vertex {vertex}");
        ticks.push(visit.discovery);
        ticks.push(visit.finish);
        if let Some(parent) = visit.parent {
            let parent_visit = result.get(parent).unwrap();
            assert!(parent_visit.discovery < visit.discovery);
            assert!(graph.contains_edge(parent, *vertex));
        }
    }
    ticks.sort_unstable();
    assert_eq!(ticks, (0..16).collect::<Vec<u64>>());
    for root in result.roots() {
        assert_eq!(result.get(*root).unwrap().parent, None);
    }
}

#[test]
fn directed_search_follows_arc_direction() {
    let mut graph: Graph = Graph::new(GraphProperties::directed());
    let a = graph.add_vertex();
    let b = graph.add_vertex();
    graph.add_edge(b, a).unwrap();

    let result = bfs(&graph).unwrap();
    assert_eq!(result.roots(), &[a, b]);
    assert_eq!(result.get(a).unwrap().parent, None);
}

#[test]
fn flow_networks_are_traversable() {
    let mut network = FlowGraph::default();
    let v: Vec<VertexId> = (0..4).map(|_| network.add_vertex()).collect();
    network.add_edge(v[0], v[1], 0.0, 1.0).unwrap();
    network.add_edge(v[1], v[3], 0.0, 1.0).unwrap();
    network.add_edge(v[0], v[2], 0.0, 1.0).unwrap();

    let result = bfs(&network).unwrap();
    assert_eq!(result.roots(), &[v[0]]);
    assert_eq!(result.get(v[3]).unwrap().parent, Some(v[1]));
}

#[test]
fn empty_graph_yields_empty_forest() {
    let graph: Graph = Graph::default();
    let result = bfs(&graph).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.ticks(), 0);
}
