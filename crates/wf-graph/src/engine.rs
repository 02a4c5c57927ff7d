//! Single-source shortest-path runs and their cache.
//!
//! One run holds the full Dijkstra result rooted at a source vertex: per
//! vertex the best known distance and the predecessor on that best path.
//! Runs are deterministic for a given graph, so the cache is append-only
//! and keyed by source; a run computed once answers every later query that
//! can be read off it.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::labels::Vertex;
use crate::matrix::{AdjacencyMatrix, DistanceMatrix};
use wf_core::Real;

/// Completed shortest-path tree rooted at `source`.
///
/// `distance[v]` is `None` when `v` is unreachable from the source;
/// `predecessor[v]` mirrors that. The source is its own predecessor.
#[derive(Debug, Clone)]
pub(crate) struct Run {
    pub source: Vertex,
    pub distance: Vec<Option<Real>>,
    pub predecessor: Vec<Option<Vertex>>,
}

/// Append-only store of completed runs, keyed by source vertex.
#[derive(Debug, Default)]
pub(crate) struct RunCache {
    runs: Vec<Run>,
    by_source: HashMap<Vertex, usize>,
}

impl RunCache {
    pub fn index_of(&self, source: Vertex) -> Option<usize> {
        self.by_source.get(&source).copied()
    }

    pub fn get(&self, index: usize) -> &Run {
        &self.runs[index]
    }

    /// Store a run and return its index. Inserting a source twice keeps the
    /// first run; results are deterministic so both are identical.
    pub fn insert(&mut self, run: Run) -> usize {
        if let Some(&index) = self.by_source.get(&run.source) {
            return index;
        }
        let index = self.runs.len();
        self.by_source.insert(run.source, index);
        self.runs.push(run);
        index
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }
}

/// Compute the shortest-path run rooted at `source`.
///
/// Ties between equally-close frontier vertices settle the lowest internal
/// index first, which makes the predecessor tree, and therefore every route
/// read off it, deterministic.
pub(crate) fn shortest_path_run(
    distances: &DistanceMatrix,
    adjacency: &AdjacencyMatrix,
    source: Vertex,
) -> QueryResult<Run> {
    let order = distances.order();
    if source >= order {
        return Err(QueryError::VertexOutOfRange {
            vertex: source,
            order,
        });
    }

    let mut distance: Vec<Option<Real>> = vec![None; order];
    let mut predecessor: Vec<Option<Vertex>> = vec![None; order];
    let mut settled = vec![false; order];

    for v in 0..order {
        if adjacency.adjacent(source, v) {
            distance[v] = distances.weight(source, v);
            predecessor[v] = Some(source);
        }
    }
    distance[source] = Some(0.0);
    predecessor[source] = Some(source);
    settled[source] = true;

    let mut settled_count = 1usize;
    while let Some((u, du)) = closest_unsettled(&distance, &settled) {
        for v in 0..order {
            if settled[v] || !adjacency.adjacent(u, v) {
                continue;
            }
            if let Some(weight) = distances.weight(u, v) {
                let candidate = du + weight;
                let improved = match distance[v] {
                    None => true,
                    Some(current) => candidate < current,
                };
                if improved {
                    distance[v] = Some(candidate);
                    predecessor[v] = Some(u);
                }
            }
        }
        settled[u] = true;
        settled_count += 1;
    }

    debug!(source, order, settled = settled_count, "shortest-path run complete");

    Ok(Run {
        source,
        distance,
        predecessor,
    })
}

/// Closest reachable unsettled vertex, lowest index on a tie.
fn closest_unsettled(distance: &[Option<Real>], settled: &[bool]) -> Option<(Vertex, Real)> {
    let mut best: Option<(Vertex, Real)> = None;
    for (v, d) in distance.iter().enumerate() {
        if settled[v] {
            continue;
        }
        if let Some(d) = *d {
            let closer = match best {
                None => true,
                Some((_, best_d)) => d < best_d,
            };
            if closer {
                best = Some((v, d));
            }
        }
    }
    best
}
