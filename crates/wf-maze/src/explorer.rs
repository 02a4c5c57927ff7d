//! Frontier-driven exploration of a partially-known maze.

use tracing::debug;

use wf_graph::{Graph, Label, QueryError, Route};

use crate::map::MazeMap;
use crate::MazeResult;

/// Plans where to explore next on a partially-known map.
///
/// The explorer holds a frozen graph of the currently-known open cells.
/// Graphs never mutate, so after a reveal the caller hands over the
/// updated map and the whole view is rebuilt.
#[derive(Debug)]
pub struct Explorer {
    map: MazeMap,
    graph: Graph,
    frontier: Vec<Label>,
}

impl Explorer {
    pub fn new(map: MazeMap) -> MazeResult<Self> {
        let graph = map.to_graph()?;
        let frontier = map.frontier();
        debug!(
            order = graph.order(),
            frontier = frontier.len(),
            "explorer view rebuilt"
        );
        Ok(Self {
            map,
            graph,
            frontier,
        })
    }

    /// Replace the known map after new cells were revealed.
    pub fn update(&mut self, map: MazeMap) -> MazeResult<()> {
        *self = Self::new(map)?;
        Ok(())
    }

    /// Route to the nearest reachable frontier cell, or `None` when no
    /// frontier cell is reachable from `from`.
    ///
    /// Ties go to the lowest frontier label. All queries in one call fan
    /// out from `from`, so they share a single source-rooted run.
    pub fn next_route(&self, from: Label) -> MazeResult<Option<Route>> {
        let mut best: Option<Route> = None;
        for &target in &self.frontier {
            match self.graph.shortest_route_with(from, target, true) {
                Ok(route) => {
                    let closer = best
                        .as_ref()
                        .map_or(true, |b| route.distance < b.distance);
                    if closer {
                        best = Some(route);
                    }
                }
                Err(QueryError::Unreachable { .. }) => {}
                Err(other) => return Err(other.into()),
            }
        }
        Ok(best)
    }

    pub fn map(&self) -> &MazeMap {
        &self.map
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn frontier(&self) -> &[Label] {
        &self.frontier
    }
}
