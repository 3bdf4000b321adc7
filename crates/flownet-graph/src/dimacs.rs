//! Line-oriented max-flow format.
//!
//! ```text
//! c optional comment
//! p max <vertices> <arcs>
//! n <id> s
//! n <id> t
//! a <from> <to> <flow> <capacity>
//! ```
//!
//! Raw vertex ids are written as-is. The problem line must come before any
//! role or arc line; everything after it may appear in any order. Declared
//! vertex counts above [`MAX_DECLARED_VERTICES`] are refused.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flownet_core::errors::{ErrorInfo, GraphError};
use flownet_core::VertexId;

use crate::flow::{FlowGraph, FlowVertex};
use crate::properties::FlowProperties;

/// Largest vertex count a problem line may declare.
pub const MAX_DECLARED_VERTICES: usize = 1 << 20;

/// Writes `graph` as one problem line, its role lines and one arc line per arc.
pub fn write_dimacs<W: Write>(graph: &FlowGraph, mut writer: W) -> Result<(), GraphError> {
    writeln!(writer, "p max {} {}", graph.num_vertices(), graph.num_edges())?;
    if let Some(source) = graph.source() {
        writeln!(writer, "n {} s", source.as_raw())?;
    }
    if let Some(sink) = graph.sink() {
        writeln!(writer, "n {} t", sink.as_raw())?;
    }
    for arc in graph.arcs() {
        writeln!(
            writer,
            "a {} {} {} {}",
            arc.from.as_raw(),
            arc.to.as_raw(),
            arc.flow,
            arc.capacity
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a flow network from the line format.
///
/// Vertices are created for every id a role or arc line names; afterwards the
/// smallest unused ids are filled in until the declared vertex count is
/// reached. An arc count that differs from the declared one is only logged.
pub fn read_dimacs<R: BufRead>(
    reader: R,
    properties: FlowProperties,
) -> Result<FlowGraph, GraphError> {
    let mut graph = FlowGraph::new(properties);
    let mut declared: Option<(usize, usize)> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let text = line.trim();
        let mut fields = text.split_whitespace();
        let Some(kind) = fields.next() else {
            continue;
        };
        let fields: Vec<&str> = fields.collect();
        match kind {
            "c" => {}
            "p" => {
                if declared.is_some() {
                    return Err(line_error("duplicate-problem", "second problem line", number, text));
                }
                declared = Some(parse_problem(&fields, number, text)?);
            }
            "n" | "a" if declared.is_none() => {
                return Err(line_error(
                    "missing-problem",
                    "problem line must precede role and arc lines",
                    number,
                    text,
                ));
            }
            "n" => {
                let [id, role] = fields[..] else {
                    return Err(line_error("bad-role", "expected `n <id> <s|t>`", number, text));
                };
                let id = parse_field::<u64>(id, number, text)?;
                let vertex = ensure_vertex(&mut graph, id, number, text)?;
                match role {
                    "s" => graph.set_source(vertex)?,
                    "t" => graph.set_sink(vertex)?,
                    _ => {
                        return Err(line_error("bad-role", "role must be `s` or `t`", number, text))
                    }
                }
            }
            "a" => {
                let [from, to, flow, capacity] = fields[..] else {
                    return Err(line_error(
                        "bad-arc",
                        "expected `a <from> <to> <flow> <capacity>`",
                        number,
                        text,
                    ));
                };
                let from = parse_field::<u64>(from, number, text)?;
                let to = parse_field::<u64>(to, number, text)?;
                let flow = parse_field::<f64>(flow, number, text)?;
                let capacity = parse_field::<f64>(capacity, number, text)?;
                let from = ensure_vertex(&mut graph, from, number, text)?;
                let to = ensure_vertex(&mut graph, to, number, text)?;
                if !graph.add_edge(from, to, flow, capacity)? {
                    return Err(line_error(
                        "rejected-arc",
                        "arc is a duplicate, a self-loop or a forbidden reverse arc",
                        number,
                        text,
                    ));
                }
            }
            _ => return Err(line_error("unknown-line", "unknown line kind", number, text)),
        }
    }

    let Some((vertices, arcs)) = declared else {
        return Err(GraphError::malformed("missing-problem", "no problem line found"));
    };
    let mut raw = 0u64;
    while graph.num_vertices() < vertices {
        if graph.vertex(raw).is_err() {
            graph.insert_vertex_with_id(raw, FlowVertex::default())?;
        }
        raw += 1;
    }
    if graph.num_edges() != arcs {
        tracing::warn!(
            declared = arcs,
            found = graph.num_edges(),
            "arc count differs from problem line"
        );
    }
    if graph.num_vertices() != vertices {
        tracing::warn!(
            declared = vertices,
            found = graph.num_vertices(),
            "vertex count exceeds problem line"
        );
    }
    tracing::debug!(
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "read flow network"
    );
    Ok(graph)
}

/// Writes `graph` to the file at `path`, replacing any existing content.
pub fn write_dimacs_file(graph: &FlowGraph, path: impl AsRef<Path>) -> Result<(), GraphError> {
    let file = File::create(path)?;
    write_dimacs(graph, BufWriter::new(file))
}

/// Reads a flow network from the file at `path`.
pub fn read_dimacs_file(
    path: impl AsRef<Path>,
    properties: FlowProperties,
) -> Result<FlowGraph, GraphError> {
    let file = File::open(path)?;
    read_dimacs(BufReader::new(file), properties)
}

fn parse_problem(fields: &[&str], number: usize, text: &str) -> Result<(usize, usize), GraphError> {
    let ["max", vertices, arcs] = fields[..] else {
        return Err(line_error(
            "bad-problem",
            "expected `p max <vertices> <arcs>`",
            number,
            text,
        ));
    };
    let vertices: usize = parse_field(vertices, number, text)?;
    if vertices > MAX_DECLARED_VERTICES {
        return Err(
            line_error("too-many-vertices", "declared vertex count exceeds the limit", number, text)
                .with_context("limit", MAX_DECLARED_VERTICES),
        );
    }
    Ok((vertices, parse_field(arcs, number, text)?))
}

fn parse_field<T: std::str::FromStr>(field: &str, number: usize, text: &str) -> Result<T, GraphError> {
    field.parse().map_err(|_| {
        line_error("bad-number", "field is not a valid number", number, text)
            .with_context("field", field)
    })
}

fn ensure_vertex(
    graph: &mut FlowGraph,
    raw: u64,
    number: usize,
    text: &str,
) -> Result<VertexId, GraphError> {
    match graph.vertex(raw) {
        Ok(id) => Ok(id),
        Err(_) => graph
            .insert_vertex_with_id(raw, FlowVertex::default())
            .map_err(|err| err.with_context("line", number).with_context("text", text)),
    }
}

fn line_error(code: &str, message: &str, number: usize, text: &str) -> GraphError {
    GraphError::Malformed(
        ErrorInfo::new(code, message)
            .with_context("line", number)
            .with_context("text", text),
    )
}
