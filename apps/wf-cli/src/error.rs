use std::path::PathBuf;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Build(#[from] wf_graph::BuildError),

    #[error("Route error: {0}")]
    Query(#[from] wf_graph::QueryError),

    #[error("Maze error: {0}")]
    Maze(#[from] wf_maze::MazeError),
}
