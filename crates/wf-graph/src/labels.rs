//! Bijective mapping between external vertex labels and internal indices.
//!
//! Externally a vertex is named by an arbitrary caller-chosen [`Label`];
//! internally every algorithm works on dense indices `0..order`. The map is
//! built once at graph construction and is immutable afterwards, so both
//! directions stay consistent for the life of the graph.

use std::collections::HashMap;

use crate::error::{BuildError, BuildResult, QueryError, QueryResult};

/// External vertex name, chosen by the caller.
pub type Label = u32;

/// Internal dense vertex index, `0..order`.
pub(crate) type Vertex = usize;

#[derive(Debug, Clone)]
pub(crate) struct LabelMap {
    internal_to_external: Vec<Label>,
    external_to_internal: HashMap<Label, Vertex>,
}

impl LabelMap {
    /// Build the map from the label list, in order: label `i` names vertex `i`.
    pub fn new(labels: &[Label], order: usize) -> BuildResult<Self> {
        if labels.len() != order {
            return Err(BuildError::LabelCountMismatch {
                expected: order,
                found: labels.len(),
            });
        }

        let mut external_to_internal = HashMap::with_capacity(order);
        for (vertex, &label) in labels.iter().enumerate() {
            if external_to_internal.insert(label, vertex).is_some() {
                return Err(BuildError::DuplicateLabel { label });
            }
        }

        Ok(Self {
            internal_to_external: labels.to_vec(),
            external_to_internal,
        })
    }

    pub fn order(&self) -> usize {
        self.internal_to_external.len()
    }

    pub fn to_internal(&self, label: Label) -> QueryResult<Vertex> {
        self.external_to_internal
            .get(&label)
            .copied()
            .ok_or(QueryError::UnknownLabel { label })
    }

    pub fn to_external(&self, vertex: Vertex) -> QueryResult<Label> {
        self.internal_to_external
            .get(vertex)
            .copied()
            .ok_or(QueryError::VertexOutOfRange {
                vertex,
                order: self.order(),
            })
    }

    /// Translate a sequence of labels, preserving order and length.
    pub fn to_internal_seq(&self, labels: &[Label]) -> QueryResult<Vec<Vertex>> {
        labels.iter().map(|&label| self.to_internal(label)).collect()
    }

    /// Translate a sequence of vertices, preserving order and length.
    pub fn to_external_seq(&self, vertices: &[Vertex]) -> QueryResult<Vec<Label>> {
        vertices.iter().map(|&v| self.to_external(v)).collect()
    }

    /// All labels in internal-index order.
    pub fn labels(&self) -> &[Label] {
        &self.internal_to_external
    }
}
