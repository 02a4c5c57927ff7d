//! Weighted-graph core: validated distance matrices, labelled vertices,
//! and memoized shortest-path queries.
//!
//! A [`Graph`] is built once from a square or triangular weight matrix plus
//! a label per vertex, then queried for shortest routes between labels.
//! Each single-source run is computed at most once and cached, so repeated
//! queries against a shared source or destination cost one walk over the
//! cached predecessor tree.
//!
//! ```
//! use wf_graph::Graph;
//!
//! // Lower-triangular input: 10 -1- 20 -2- 30 -1- 40.
//! let rows = vec![
//!     vec![None],
//!     vec![Some(1.0), None],
//!     vec![None, Some(2.0), None],
//!     vec![None, None, Some(1.0), None],
//! ];
//! let graph = Graph::from_matrix(&rows, &[10, 20, 30, 40])?;
//!
//! let route = graph.shortest_route(10, 40)?;
//! assert_eq!(route.distance, 4.0);
//! assert_eq!(route.vertices, vec![10, 20, 30, 40]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod graph;
pub mod labels;
pub mod matrix;

mod engine;

pub use error::{BuildError, BuildResult, QueryError, QueryResult};
pub use graph::{Graph, Route};
pub use labels::Label;
pub use matrix::{MatrixShape, NO_EDGE};
