//! On-disk network format.
//!
//! A network file carries the vertex labels and the jagged weight matrix,
//! square or triangular, with `null` for absent edges. YAML is the default;
//! `.json` files are parsed as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};
use wf_core::Real;
use wf_graph::{BuildResult, Graph, Label};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub name: Option<String>,
    pub labels: Vec<Label>,
    pub matrix: Vec<Vec<Option<Real>>>,
}

impl NetworkFile {
    pub fn to_graph(&self) -> BuildResult<Graph> {
        Graph::from_matrix(&self.matrix, &self.labels)
    }
}

pub fn load_network(path: &Path) -> CliResult<NetworkFile> {
    let content = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let file = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(file)
}
