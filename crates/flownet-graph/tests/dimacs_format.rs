use std::io::Cursor;

use flownet_core::rng::RngHandle;
use flownet_core::GraphError;
use flownet_graph::{
    gen_random_flow, read_dimacs, read_dimacs_file, write_dimacs, write_dimacs_file, FlowGraph,
    FlowProperties, MAX_DECLARED_VERTICES, MAX_VERTEX_ID,
};

fn arc_tuples(network: &FlowGraph) -> Vec<(u64, u64, f64, f64)> {
    let mut arcs: Vec<_> = network
        .arcs()
        .map(|arc| (arc.from.as_raw(), arc.to.as_raw(), arc.flow, arc.capacity))
        .collect();
    arcs.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    arcs
}

fn assert_same_arcs(left: &FlowGraph, right: &FlowGraph) {
    assert_eq!(left.num_vertices(), right.num_vertices());
    assert_eq!(left.num_edges(), right.num_edges());
    for (a, b) in arc_tuples(left).into_iter().zip(arc_tuples(right)) {
        assert_eq!((a.0, a.1), (b.0, b.1));
        assert!((a.2 - b.2).abs() < 1e-9);
        assert!((a.3 - b.3).abs() < 1e-9);
    }
}

fn read(text: &str) -> Result<FlowGraph, GraphError> {
    read_dimacs(Cursor::new(text), FlowProperties::default())
}

#[test]
fn written_networks_read_back_identically() {
    let mut rng = RngHandle::from_seed(11);
    let mut network = gen_random_flow(30, 90, 50, FlowProperties::default(), &mut rng).unwrap();
    let some_arc = network.arcs().next().map(|arc| (arc.from, arc.to)).unwrap();
    network.set_flow(some_arc.0, some_arc.1, 0.375).unwrap();

    let mut buffer = Vec::new();
    write_dimacs(&network, &mut buffer).unwrap();
    let restored = read(std::str::from_utf8(&buffer).unwrap()).unwrap();

    assert_same_arcs(&network, &restored);
    assert_eq!(restored.source().map(|id| id.as_raw()), Some(0));
    assert_eq!(restored.sink().map(|id| id.as_raw()), Some(29));
}

#[test]
fn file_helpers_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.max");
    let mut rng = RngHandle::from_seed(12);
    let network = gen_random_flow(10, 20, 9, FlowProperties::default(), &mut rng).unwrap();

    write_dimacs_file(&network, &path).unwrap();
    let restored = read_dimacs_file(&path, FlowProperties::default()).unwrap();
    assert_same_arcs(&network, &restored);
}

#[test]
fn missing_file_is_an_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_dimacs_file(dir.path().join("absent.max"), FlowProperties::default())
        .unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
}

#[test]
fn reader_tolerates_comments_and_any_order() {
    let text = "\
c a small network
p max 5 3

a 1 3 0 2.5
n 3 t
c interleaved comment
a 0 1 1 4
n 0 s
a 0 2 0 1
";
    let network = read(text).unwrap();
    assert_eq!(network.num_vertices(), 5);
    assert_eq!(network.num_edges(), 3);
    assert_eq!(network.source().map(|id| id.as_raw()), Some(0));
    assert_eq!(network.sink().map(|id| id.as_raw()), Some(3));
    let v1 = network.vertex(1).unwrap();
    let v3 = network.vertex(3).unwrap();
    assert_eq!(network.capacity(v1, v3).unwrap(), 2.5);
    assert!(network.vertex(4).is_ok());
}

#[test]
fn arc_count_mismatch_is_only_a_warning() {
    let network = read("p max 2 5\na 0 1 0 1\n").unwrap();
    assert_eq!(network.num_edges(), 1);
}

fn malformed(text: &str) -> (String, String) {
    match read(text) {
        Err(GraphError::Malformed(info)) => {
            let line = info.context.get("line").cloned().unwrap_or_default();
            (info.code, line)
        }
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn malformed_lines_carry_their_position() {
    assert_eq!(malformed("a 0 1 0 1\n"), ("missing-problem".into(), "1".into()));
    assert_eq!(
        malformed("p max 2 1\np max 2 1\n"),
        ("duplicate-problem".into(), "2".into())
    );
    assert_eq!(malformed("p flow 2 1\n"), ("bad-problem".into(), "1".into()));
    assert_eq!(
        malformed("p max 2 1\nc ok\na 0 x 0 1\n"),
        ("bad-number".into(), "3".into())
    );
    assert_eq!(malformed("p max 2 1\na 0 1 0\n"), ("bad-arc".into(), "2".into()));
    assert_eq!(
        malformed("p max 2 2\na 0 1 0 1\na 0 1 0 3\n"),
        ("rejected-arc".into(), "3".into())
    );
    assert_eq!(malformed("p max 2 0\nn 0 x\n"), ("bad-role".into(), "2".into()));
    assert_eq!(malformed("p max 2 0\nq 1 2\n"), ("unknown-line".into(), "2".into()));
}

#[test]
fn empty_input_has_no_problem_line() {
    let err = read("c nothing here\n").unwrap_err();
    assert_eq!(err.info().code, "missing-problem");
}

#[test]
fn reverse_arcs_follow_the_requested_properties() {
    let text = "p max 2 2\na 0 1 0 1\na 1 0 0 1\n";
    assert_eq!(read(text).unwrap().num_edges(), 2);
    let strict = read_dimacs(
        Cursor::new(text),
        FlowProperties::default().without_reverse_edges(),
    );
    assert_eq!(strict.unwrap_err().info().code, "rejected-arc");
}

#[test]
fn ids_past_the_limit_are_refused_with_their_line() {
    let (code, line) = malformed("p max 2 1\na 0 18446744073709551615 0 1\n");
    assert_eq!((code.as_str(), line.as_str()), ("vertex-id-range", "2"));

    let mut network = read(&format!("p max 2 1\na 0 {MAX_VERTEX_ID} 0 1\n")).unwrap();
    let first = network.add_vertex();
    let second = network.add_vertex();
    assert_ne!(first, second);
    assert_eq!(network.num_vertices(), 4);
    network.remove_vertex(first).unwrap();
    network.remove_vertex(second).unwrap();
    assert_eq!(network.num_vertices(), 2);
}

#[test]
fn oversized_vertex_declarations_are_refused() {
    let err = read("p max 50000000 0\n").unwrap_err();
    assert_eq!(err.info().code, "too-many-vertices");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("1"));

    let network = read(&format!("p max {MAX_DECLARED_VERTICES} 0\n")).unwrap();
    assert_eq!(network.num_vertices(), MAX_DECLARED_VERTICES);
}
