//! The public graph type and its route queries.
//!
//! A [`Graph`] is validated and frozen at construction; queries never
//! mutate the topology. The only interior state is the run cache, guarded
//! by a mutex so a graph can be shared across threads and each
//! single-source run is still computed at most once.

use std::sync::{Mutex, MutexGuard};

use rayon::prelude::*;
use tracing::debug;

use crate::engine::{shortest_path_run, Run, RunCache};
use crate::error::{BuildResult, QueryError, QueryResult};
use crate::labels::{Label, LabelMap, Vertex};
use crate::matrix::{
    canonicalize, classify_shape, validate_elements, AdjacencyMatrix, DistanceMatrix, MatrixShape,
    NO_EDGE,
};
use wf_core::Real;

/// A route between two labelled vertices.
///
/// `vertices` runs from the query's `from` to its `to` inclusive; a
/// degenerate query `v -> v` yields distance zero and the single vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub distance: Real,
    pub vertices: Vec<Label>,
}

/// Weighted graph with labelled vertices and memoized shortest-path runs.
#[derive(Debug)]
pub struct Graph {
    order: usize,
    shape: MatrixShape,
    distances: DistanceMatrix,
    adjacency: AdjacencyMatrix,
    labels: LabelMap,
    cache: Mutex<RunCache>,
}

impl Graph {
    /// Build a graph from a jagged weight matrix and one label per vertex.
    ///
    /// The matrix may be square, lower-triangular, or upper-triangular;
    /// `None` entries mean no edge. Triangular inputs are mirrored into a
    /// symmetric square matrix. Construction fails on a malformed shape,
    /// a non-finite or negative weight, or a label list that is not a
    /// bijection onto the rows.
    pub fn from_matrix(rows: &[Vec<Option<Real>>], labels: &[Label]) -> BuildResult<Self> {
        let shape = classify_shape(rows)?;
        validate_elements(rows)?;
        let distances = canonicalize(rows, shape);
        let adjacency = AdjacencyMatrix::from_distances(&distances);
        let order = distances.order();
        let labels = LabelMap::new(labels, order)?;

        debug!(order, shape = ?shape, "graph constructed");

        Ok(Self {
            order,
            shape,
            distances,
            adjacency,
            labels,
            cache: Mutex::new(RunCache::default()),
        })
    }

    /// Build from a raw `f64` matrix where [`NO_EDGE`] marks absent edges.
    ///
    /// Any other negative value is rejected as an invalid element, exactly
    /// as it would be in [`Graph::from_matrix`].
    pub fn from_raw_matrix(rows: &[Vec<Real>], labels: &[Label]) -> BuildResult<Self> {
        let rows: Vec<Vec<Option<Real>>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&w| if w == NO_EDGE { None } else { Some(w) })
                    .collect()
            })
            .collect();
        Self::from_matrix(&rows, labels)
    }

    /// Shortest route between two labels, reusing any applicable cached run.
    pub fn shortest_route(&self, from: Label, to: Label) -> QueryResult<Route> {
        self.shortest_route_with(from, to, false)
    }

    /// Shortest route with an explicit hint for which run to compute on a
    /// cache miss.
    ///
    /// A cached run rooted at the destination is preferred, then one rooted
    /// at the source; only when neither exists does `prefer_source_run`
    /// decide which run to compute. `true` pays off when the same source
    /// will be queried against many destinations. On an asymmetric square
    /// matrix the two roots read opposite edge directions, so callers that
    /// need strictly directed costs there should keep the cache warm with
    /// the roots they mean to read.
    pub fn shortest_route_with(
        &self,
        from: Label,
        to: Label,
        prefer_source_run: bool,
    ) -> QueryResult<Route> {
        let source = self.labels.to_internal(from)?;
        let dest = self.labels.to_internal(to)?;

        if source == dest {
            return Ok(Route {
                distance: 0.0,
                vertices: vec![from],
            });
        }

        let mut cache = self.lock_cache()?;
        let (index, rooted_at_source) = match cache.index_of(dest) {
            Some(index) => (index, false),
            None => match cache.index_of(source) {
                Some(index) => (index, true),
                None => {
                    let root = if prefer_source_run { source } else { dest };
                    let run = shortest_path_run(&self.distances, &self.adjacency, root)?;
                    (cache.insert(run), prefer_source_run)
                }
            },
        };
        let run = cache.get(index);

        // Walking a source-rooted run starts at the destination and is
        // reversed afterwards; a dest-rooted run already reads forward.
        let (walk_start, root) = if rooted_at_source {
            (dest, source)
        } else {
            (source, dest)
        };

        let distance = run.distance[walk_start].ok_or(QueryError::Unreachable { from, to })?;

        let mut vertices = vec![walk_start];
        let mut current = walk_start;
        while current != root {
            let next = run.predecessor[current].ok_or(QueryError::Unreachable { from, to })?;
            vertices.push(next);
            if vertices.len() > self.order {
                return Err(QueryError::Invariant {
                    what: "predecessor walk exceeded graph order",
                });
            }
            current = next;
        }
        if rooted_at_source {
            vertices.reverse();
        }

        Ok(Route {
            distance,
            vertices: self.labels.to_external_seq(&vertices)?,
        })
    }

    /// Compute every missing run, in parallel, and freeze the cache warm.
    ///
    /// Returns the total number of cached runs afterwards, which equals the
    /// graph order. Queries issued concurrently are unaffected; duplicate
    /// runs are discarded on insert.
    pub fn precompute_all(&self) -> QueryResult<usize> {
        let sources: Vec<Vertex> = (0..self.order).collect();
        self.precompute_runs(&sources)
    }

    /// Compute runs rooted at the given labels, in parallel.
    ///
    /// Covers the common case where only a few hub vertices will ever be
    /// query endpoints. Returns the total number of cached runs afterwards.
    pub fn precompute_for(&self, sources: &[Label]) -> QueryResult<usize> {
        let sources = self.labels.to_internal_seq(sources)?;
        self.precompute_runs(&sources)
    }

    fn precompute_runs(&self, sources: &[Vertex]) -> QueryResult<usize> {
        let mut missing: Vec<Vertex> = {
            let cache = self.lock_cache()?;
            sources
                .iter()
                .copied()
                .filter(|&v| cache.index_of(v).is_none())
                .collect()
        };
        missing.sort_unstable();
        missing.dedup();

        let runs = missing
            .par_iter()
            .map(|&source| shortest_path_run(&self.distances, &self.adjacency, source))
            .collect::<QueryResult<Vec<Run>>>()?;

        let mut cache = self.lock_cache()?;
        for run in runs {
            cache.insert(run);
        }
        debug!(runs = cache.len(), "run cache precomputed");
        Ok(cache.len())
    }

    /// Number of single-source runs currently cached.
    pub fn runs_computed(&self) -> QueryResult<usize> {
        Ok(self.lock_cache()?.len())
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Vertex labels in internal-index order.
    pub fn labels(&self) -> &[Label] {
        self.labels.labels()
    }

    /// The shape the input matrix was classified as.
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Number of directed edges. Mirrored triangular input counts each
    /// undirected edge twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Stored weight of the directed edge `from -> to`, `None` if absent.
    ///
    /// Reads the canonical matrix as stored, diagonal included.
    pub fn edge_weight(&self, from: Label, to: Label) -> QueryResult<Option<Real>> {
        let i = self.labels.to_internal(from)?;
        let j = self.labels.to_internal(to)?;
        Ok(self.distances.weight(i, j))
    }

    /// Whether a usable edge `from -> to` exists. Self-loops never count.
    pub fn adjacent(&self, from: Label, to: Label) -> QueryResult<bool> {
        let i = self.labels.to_internal(from)?;
        let j = self.labels.to_internal(to)?;
        Ok(self.adjacency.adjacent(i, j))
    }

    fn lock_cache(&self) -> QueryResult<MutexGuard<'_, RunCache>> {
        self.cache.lock().map_err(|_| QueryError::Invariant {
            what: "run cache lock poisoned",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    fn chain() -> Graph {
        // 10 -1- 20 -2- 30 -1- 40
        let rows = vec![
            vec![NO_EDGE],
            vec![1.0, NO_EDGE],
            vec![NO_EDGE, 2.0, NO_EDGE],
            vec![NO_EDGE, NO_EDGE, 1.0, NO_EDGE],
        ];
        Graph::from_raw_matrix(&rows, &[10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn raw_sentinel_maps_to_absent() {
        let g = chain();
        assert_eq!(g.edge_weight(10, 30).unwrap(), None);
        assert_eq!(g.edge_weight(10, 20).unwrap(), Some(1.0));
        assert!(!g.adjacent(10, 30).unwrap());
        assert!(g.adjacent(20, 10).unwrap());
    }

    #[test]
    fn raw_negative_non_sentinel_is_invalid() {
        let rows = vec![vec![NO_EDGE, -2.0], vec![-2.0, NO_EDGE]];
        assert_eq!(
            Graph::from_raw_matrix(&rows, &[1, 2]).unwrap_err(),
            BuildError::InvalidElement {
                row: 0,
                col: 1,
                value: -2.0
            }
        );
    }

    #[test]
    fn same_vertex_route_is_trivial_and_uncached() {
        let g = chain();
        let route = g.shortest_route(30, 30).unwrap();
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.vertices, vec![30]);
        assert_eq!(g.runs_computed().unwrap(), 0);
    }

    #[test]
    fn default_query_roots_the_run_at_the_destination() {
        let g = chain();
        g.shortest_route(10, 40).unwrap();
        assert_eq!(g.runs_computed().unwrap(), 1);

        // Any query into the same destination reuses that run.
        g.shortest_route(20, 40).unwrap();
        assert_eq!(g.runs_computed().unwrap(), 1);
    }

    #[test]
    fn prefer_source_run_roots_at_the_source() {
        let g = chain();
        g.shortest_route_with(10, 40, true).unwrap();
        assert_eq!(g.runs_computed().unwrap(), 1);

        // Fanning out from the same source stays on one run.
        g.shortest_route_with(10, 20, true).unwrap();
        g.shortest_route_with(10, 30, true).unwrap();
        assert_eq!(g.runs_computed().unwrap(), 1);
    }

    #[test]
    fn unknown_labels_fail_before_any_run() {
        let g = chain();
        assert_eq!(
            g.shortest_route(10, 99).unwrap_err(),
            QueryError::UnknownLabel { label: 99 }
        );
        assert_eq!(g.runs_computed().unwrap(), 0);
    }

    #[test]
    fn empty_graph_builds_but_answers_nothing() {
        let g = Graph::from_matrix(&[], &[]).unwrap();
        assert_eq!(g.order(), 0);
        assert_eq!(g.shape(), MatrixShape::Square);
        assert_eq!(
            g.shortest_route(0, 0).unwrap_err(),
            QueryError::UnknownLabel { label: 0 }
        );
    }

    #[test]
    fn label_errors_take_build_precedence_after_matrix_checks() {
        let rows = vec![vec![NO_EDGE], vec![1.0, NO_EDGE]];
        assert_eq!(
            Graph::from_raw_matrix(&rows, &[5]).unwrap_err(),
            BuildError::LabelCountMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            Graph::from_raw_matrix(&rows, &[5, 5]).unwrap_err(),
            BuildError::DuplicateLabel { label: 5 }
        );
    }
}
