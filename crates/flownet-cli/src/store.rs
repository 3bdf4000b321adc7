use std::error::Error;
use std::fs;
use std::path::Path;

use flownet_graph::{
    flow_from_bytes, flow_from_json, flow_to_bytes, flow_to_json, graph_from_bytes,
    graph_from_json, graph_to_bytes, graph_to_json, read_dimacs_file, write_dimacs_file,
    FlowGraph, FlowProperties, Graph,
};

/// On-disk carrier, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Binary,
    Dimacs,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("bin") => Ok(Format::Binary),
            Some("max") => Ok(Format::Dimacs),
            other => Err(format!(
                "unsupported extension {:?} for {}; expected .json, .bin or .max",
                other.unwrap_or(""),
                path.display()
            )
            .into()),
        }
    }
}

/// A graph read back from disk.
#[derive(Debug)]
pub enum Stored {
    Plain(Graph),
    Flow(FlowGraph),
}

/// Loads `path`; `.max` files are always flow networks, other formats only
/// when `flow` is set.
pub fn load(path: &Path, flow: bool) -> Result<Stored, Box<dyn Error>> {
    let format = Format::from_path(path)?;
    if flow || format == Format::Dimacs {
        return Ok(Stored::Flow(load_flow(path)?));
    }
    let graph = match format {
        Format::Binary => graph_from_bytes(&fs::read(path)?)?,
        _ => graph_from_json(&fs::read_to_string(path)?)?,
    };
    tracing::info!(path = %path.display(), ?format, "loaded graph");
    Ok(Stored::Plain(graph))
}

pub fn load_flow(path: &Path) -> Result<FlowGraph, Box<dyn Error>> {
    let format = Format::from_path(path)?;
    let network = match format {
        Format::Json => flow_from_json(&fs::read_to_string(path)?)?,
        Format::Binary => flow_from_bytes(&fs::read(path)?)?,
        Format::Dimacs => read_dimacs_file(path, FlowProperties::default())?,
    };
    tracing::info!(path = %path.display(), ?format, "loaded flow network");
    Ok(network)
}

pub fn save_plain(graph: &Graph, path: &Path) -> Result<(), Box<dyn Error>> {
    match Format::from_path(path)? {
        Format::Json => fs::write(path, graph_to_json(graph)?)?,
        Format::Binary => fs::write(path, graph_to_bytes(graph)?)?,
        Format::Dimacs => {
            return Err("the .max format only holds flow networks; pass --flow".into());
        }
    }
    tracing::info!(path = %path.display(), "wrote graph");
    Ok(())
}

pub fn save_flow(network: &FlowGraph, path: &Path) -> Result<(), Box<dyn Error>> {
    match Format::from_path(path)? {
        Format::Json => fs::write(path, flow_to_json(network)?)?,
        Format::Binary => fs::write(path, flow_to_bytes(network)?)?,
        Format::Dimacs => write_dimacs_file(network, path)?,
    }
    tracing::info!(path = %path.display(), "wrote flow network");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flownet_core::rng::RngHandle;
    use flownet_graph::{flow_canonical_hash, gen_random_flow};

    #[test]
    fn extensions_select_formats() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.bin")).unwrap(), Format::Binary);
        assert_eq!(Format::from_path(Path::new("a.max")).unwrap(), Format::Dimacs);
        assert!(Format::from_path(Path::new("a.txt")).is_err());
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn flow_networks_survive_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = RngHandle::from_seed(5);
        let network = gen_random_flow(6, 9, 4, FlowProperties::default(), &mut rng).unwrap();
        let expected = flow_canonical_hash(&network).unwrap();
        for name in ["n.json", "n.bin"] {
            let path = dir.path().join(name);
            save_flow(&network, &path).unwrap();
            let restored = load_flow(&path).unwrap();
            assert_eq!(flow_canonical_hash(&restored).unwrap(), expected);
        }
        let path = dir.path().join("n.max");
        save_flow(&network, &path).unwrap();
        assert_eq!(load_flow(&path).unwrap().num_edges(), 9);
    }

    #[test]
    fn plain_graphs_refuse_the_flow_format() {
        let dir = tempfile::tempdir().unwrap();
        let graph = Graph::default();
        assert!(save_plain(&graph, &dir.path().join("g.max")).is_err());
        let path = dir.path().join("g.json");
        save_plain(&graph, &path).unwrap();
        assert!(matches!(load(&path, false).unwrap(), Stored::Plain(_)));
    }
}
