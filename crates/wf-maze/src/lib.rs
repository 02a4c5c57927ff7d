//! wf-maze: grid mazes viewed as weighted graphs, with frontier-driven
//! exploration of partially-known maps.

pub mod explorer;
pub mod map;
pub mod schema;

pub use explorer::Explorer;
pub use map::{Cell, MazeMap};
pub use schema::MazeFile;

pub type MazeResult<T> = Result<T, MazeError>;

#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    #[error("Maze grid is empty")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized cell '{ch}' at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },

    #[error("Maze has no start cell")]
    MissingStart,

    #[error("Maze has more than one start cell")]
    DuplicateStart,

    #[error("Maze has more than one exit cell")]
    DuplicateExit,

    #[error("Maze has no exit cell")]
    NoExit,

    #[error("Maze of {width}x{height} cells exceeds the label space")]
    GridTooLarge { width: usize, height: usize },

    #[error("Graph error: {0}")]
    Build(#[from] wf_graph::BuildError),

    #[error("Query error: {0}")]
    Query(#[from] wf_graph::QueryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load a maze map from a YAML file.
pub fn load_yaml(path: &std::path::Path) -> MazeResult<MazeMap> {
    let content = std::fs::read_to_string(path)?;
    let file: MazeFile = serde_yaml::from_str(&content)?;
    file.to_map()
}
