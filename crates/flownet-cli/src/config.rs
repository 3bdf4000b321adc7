use std::error::Error;
use std::fs;
use std::path::Path;

use flownet_graph::{FlowProperties, GraphProperties, IdPolicy};
use serde::{Deserialize, Serialize};

/// Generator settings read from a YAML or JSON file.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub vertices: usize,
    pub edges: usize,
    pub seed: u64,
    pub directed: bool,
    pub self_loops: bool,
    pub flow: bool,
    pub max_capacity: u32,
    pub reverse_edges: bool,
    pub id_policy: IdPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vertices: 20,
            edges: 100,
            seed: 0,
            directed: false,
            self_loops: false,
            flow: false,
            max_capacity: 100,
            reverse_edges: true,
            id_policy: IdPolicy::Monotonic,
        }
    }
}

impl GeneratorConfig {
    /// Loads a config file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        Ok(config)
    }

    pub fn graph_properties(&self) -> GraphProperties {
        GraphProperties {
            directed: self.directed,
            self_loops_allowed: self.self_loops,
            id_policy: self.id_policy,
        }
    }

    pub fn flow_properties(&self) -> FlowProperties {
        FlowProperties {
            reverse_edges_allowed: self.reverse_edges,
            id_policy: self.id_policy,
        }
    }
}
