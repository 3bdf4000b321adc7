use flownet_core::{GraphError, VertexId};
use flownet_graph::{EdgeInsert, Graph, GraphProperties};

fn graph_with(properties: GraphProperties, n: usize) -> (Graph<(), u32>, Vec<VertexId>) {
    let mut graph = Graph::new(properties);
    let ids = (0..n).map(|_| graph.add_vertex()).collect();
    (graph, ids)
}

#[test]
fn undirected_pairs_are_stored_once_under_the_larger_id() {
    let (mut graph, v) = graph_with(GraphProperties::undirected(), 3);

    let first = graph.add_edge_with(v[0], v[2], 7).unwrap();
    assert!(first.is_created());
    assert_eq!(first.key().from, v[2]);
    assert_eq!(first.key().to, v[0]);

    let second = graph.add_edge_with(v[2], v[0], 99).unwrap();
    assert_eq!(second, EdgeInsert::Existing(first.key()));
    assert_eq!(graph.num_edges(), 1);
    assert_eq!(graph.edge_payload(v[0], v[2]).unwrap(), Some(&7));
    assert_eq!(graph.edge_payload(v[2], v[0]).unwrap(), Some(&7));

    let view = graph.edge(v[0], v[2]).unwrap();
    assert_eq!((view.from, view.to), (v[2], v[0]));
}

#[test]
fn directed_pairs_are_distinct() {
    let (mut graph, v) = graph_with(GraphProperties::directed(), 2);
    graph.add_edge(v[0], v[1]).unwrap();
    graph.add_edge(v[1], v[0]).unwrap();
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(graph.out_degree(v[0]).unwrap(), 1);
    assert_eq!(graph.in_degree(v[0]).unwrap(), 1);
    assert_eq!(graph.degree(v[0]).unwrap(), 2);

    graph.remove_edge(v[1], v[0]).unwrap();
    assert!(graph.contains_edge(v[0], v[1]));
    assert!(!graph.contains_edge(v[1], v[0]));
}

#[test]
fn self_loops_follow_the_graph_properties() {
    let (mut strict, v) = graph_with(GraphProperties::undirected(), 1);
    let err = strict.add_edge(v[0], v[0]).unwrap_err();
    assert!(matches!(err, GraphError::SelfLoopRejected(_)));
    assert_eq!(strict.num_edges(), 0);

    let (mut loose, w) = graph_with(GraphProperties::undirected().with_self_loops(), 1);
    assert!(loose.add_edge(w[0], w[0]).unwrap().is_created());
    assert_eq!(loose.degree(w[0]).unwrap(), 1);
    assert_eq!(loose.neighbors(w[0]).unwrap().collect::<Vec<_>>(), vec![w[0]]);
}

#[test]
fn edge_payloads_can_be_replaced() {
    let (mut graph, v) = graph_with(GraphProperties::directed(), 2);
    graph.add_edge(v[0], v[1]).unwrap();
    assert_eq!(graph.edge_payload(v[0], v[1]).unwrap(), None);
    assert_eq!(graph.set_edge_payload(v[0], v[1], Some(3)).unwrap(), None);
    if let Some(weight) = graph.edge_payload_mut(v[0], v[1]).unwrap() {
        *weight += 1;
    }
    assert_eq!(graph.remove_edge(v[0], v[1]).unwrap(), Some(4));
    assert!(matches!(
        graph.remove_edge(v[0], v[1]),
        Err(GraphError::EdgeNotFound(_))
    ));
}

#[test]
fn removing_a_vertex_drops_exactly_its_incident_edges() {
    for properties in [GraphProperties::directed(), GraphProperties::undirected()] {
        let (mut graph, v) = graph_with(properties.with_self_loops(), 5);
        let pairs = [(0, 1), (1, 0), (2, 1), (1, 3), (3, 4), (1, 1), (4, 0)];
        for (a, b) in pairs {
            graph.add_edge(v[a], v[b]).unwrap();
        }
        let before = graph.num_edges();
        let incident = graph.degree(v[1]).unwrap();

        graph.remove_vertex(v[1]).unwrap();

        assert_eq!(graph.num_edges(), before - incident);
        assert_eq!(graph.edges().count(), graph.num_edges());
        for edge in graph.edges() {
            assert_ne!(edge.from, v[1]);
            assert_ne!(edge.to, v[1]);
        }
        for other in [v[0], v[2], v[3], v[4]] {
            assert!(graph.neighbors(other).unwrap().all(|n| n != v[1]));
        }
    }
}

#[test]
fn undirected_neighbors_see_both_sides() {
    let (mut graph, v) = graph_with(GraphProperties::undirected(), 4);
    graph.add_edge(v[0], v[1]).unwrap();
    graph.add_edge(v[3], v[0]).unwrap();
    graph.add_edge(v[2], v[0]).unwrap();

    let mut neighbors: Vec<u64> = graph
        .neighbors(v[0])
        .unwrap()
        .map(|id| id.as_raw())
        .collect();
    neighbors.sort_unstable();
    assert_eq!(neighbors, vec![1, 2, 3]);
    assert_eq!(graph.degree(v[0]).unwrap(), 3);
}

#[test]
fn iteration_is_restartable() {
    let (mut graph, v) = graph_with(GraphProperties::directed(), 3);
    graph.add_edge(v[0], v[1]).unwrap();
    graph.add_edge(v[1], v[2]).unwrap();

    let first: Vec<_> = graph.edges().map(|edge| edge.key()).collect();
    let second: Vec<_> = graph.edges().map(|edge| edge.key()).collect();
    assert_eq!(first, second);
    assert_eq!(graph.vertices().count(), 3);
    assert_eq!(graph.vertices().count(), 3);
}
