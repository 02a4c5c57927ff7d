//! Distance-matrix validation and canonicalization.
//!
//! A graph is constructed from a jagged matrix of edge weights. Three input
//! shapes are accepted, inferred from the row-length progression:
//!
//! - **Square**: every row has `order` entries. Taken as-is; the matrix may
//!   be asymmetric (directed edges).
//! - **Lower-triangular**: row `i` has `i + 1` entries. Undirected; entry
//!   `(i, j)` for `j <= i` is mirrored into `(j, i)`.
//! - **Upper-triangular**: row `i` has `order - i` entries, covering columns
//!   `i..order`. Undirected; mirrored symmetrically.
//!
//! The shape candidate is determined from the first rows and then every
//! row's length is checked against the expected progression, so a matrix
//! that starts triangular but deviates later is rejected rather than
//! misread. Elements must be finite and non-negative; the absence of an
//! edge is `None` (or [`NO_EDGE`] in raw `f64` input).

use crate::error::{BuildError, BuildResult};
use crate::labels::Vertex;
use wf_core::Real;

/// Sentinel used by raw `f64` matrices to mean "no edge here".
///
/// Inside the crate the absent case is carried as `Option<Real>`; the
/// sentinel exists only at the input boundary.
pub const NO_EDGE: Real = -1.0;

/// The inferred layout of an input distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShape {
    Square,
    LowerTriangular,
    UpperTriangular,
}

impl MatrixShape {
    /// Expected length of row `i` in a matrix of the given order.
    fn expected_len(self, i: usize, order: usize) -> usize {
        match self {
            MatrixShape::Square => order,
            MatrixShape::LowerTriangular => i + 1,
            MatrixShape::UpperTriangular => order - i,
        }
    }
}

/// Canonical square distance matrix, row-major.
///
/// `None` means no edge. Owned exclusively by the graph that built it.
#[derive(Debug, Clone)]
pub(crate) struct DistanceMatrix {
    order: usize,
    cells: Vec<Option<Real>>,
}

impl DistanceMatrix {
    pub fn order(&self) -> usize {
        self.order
    }

    /// Weight of the directed edge `i -> j`, or `None` if absent.
    pub fn weight(&self, i: Vertex, j: Vertex) -> Option<Real> {
        self.cells[i * self.order + j]
    }
}

/// Derived boolean adjacency, row-major. Self-loops are never adjacent.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyMatrix {
    order: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn from_distances(distances: &DistanceMatrix) -> Self {
        let order = distances.order();
        let mut cells = vec![false; order * order];
        for i in 0..order {
            for j in 0..order {
                cells[i * order + j] = i != j && distances.weight(i, j).is_some();
            }
        }
        Self { order, cells }
    }

    pub fn adjacent(&self, i: Vertex, j: Vertex) -> bool {
        self.cells[i * self.order + j]
    }

    /// Number of directed edges (ordered adjacent pairs).
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&present| present).count()
    }
}

/// Infer the matrix shape and verify every row against it.
///
/// Degenerate orders (0 and 1) are reported as square: all three shapes
/// coincide there and canonicalization is identical.
pub(crate) fn classify_shape(rows: &[Vec<Option<Real>>]) -> BuildResult<MatrixShape> {
    let order = rows.len();

    // The canonical matrix is a dense order^2 allocation.
    order
        .checked_mul(order)
        .ok_or(BuildError::TooLarge { order })?;

    let shape = if order <= 1 {
        MatrixShape::Square
    } else if rows[0].len() == order {
        // A square and an upper-triangular matrix share their first row
        // length; the second row separates them.
        match rows[1].len() {
            len if len == order => MatrixShape::Square,
            len if len == order - 1 => MatrixShape::UpperTriangular,
            len => {
                return Err(BuildError::BadShape { order, row: 1, len });
            }
        }
    } else if rows[0].len() == 1 {
        MatrixShape::LowerTriangular
    } else {
        return Err(BuildError::BadShape {
            order,
            row: 0,
            len: rows[0].len(),
        });
    };

    for (i, row) in rows.iter().enumerate() {
        let expected = shape.expected_len(i, order);
        if row.len() != expected {
            return Err(BuildError::BadShape {
                order,
                row: i,
                len: row.len(),
            });
        }
    }

    Ok(shape)
}

/// Check that every present weight is finite and non-negative.
///
/// Coordinates in the error refer to the input's jagged layout.
pub(crate) fn validate_elements(rows: &[Vec<Option<Real>>]) -> BuildResult<()> {
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if let Some(value) = *cell {
                if !value.is_finite() || value < 0.0 {
                    return Err(BuildError::InvalidElement {
                        row: i,
                        col: j,
                        value,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Expand a shape-checked jagged matrix into the canonical square form.
///
/// Triangular inputs are mirrored across the diagonal; square inputs are
/// copied as-is. Must only be called with rows that passed
/// [`classify_shape`] for the given shape.
pub(crate) fn canonicalize(rows: &[Vec<Option<Real>>], shape: MatrixShape) -> DistanceMatrix {
    let order = rows.len();
    let mut cells = vec![None; order * order];

    match shape {
        MatrixShape::Square => {
            for (i, row) in rows.iter().enumerate() {
                for (j, &cell) in row.iter().enumerate() {
                    cells[i * order + j] = cell;
                }
            }
        }
        MatrixShape::LowerTriangular => {
            for (i, row) in rows.iter().enumerate() {
                for (j, &cell) in row.iter().enumerate() {
                    cells[i * order + j] = cell;
                    cells[j * order + i] = cell;
                }
            }
        }
        MatrixShape::UpperTriangular => {
            for (i, row) in rows.iter().enumerate() {
                // Row i covers columns i..order.
                for (offset, &cell) in row.iter().enumerate() {
                    let j = i + offset;
                    cells[i * order + j] = cell;
                    cells[j * order + i] = cell;
                }
            }
        }
    }

    DistanceMatrix { order, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(rows: &[&[Real]]) -> Vec<Vec<Option<Real>>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|&w| if w == NO_EDGE { None } else { Some(w) })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn classify_square() {
        let rows = opt(&[&[-1.0, 2.0], &[2.0, -1.0]]);
        assert_eq!(classify_shape(&rows).unwrap(), MatrixShape::Square);
    }

    #[test]
    fn classify_lower_triangular() {
        let rows = opt(&[&[-1.0], &[1.0, -1.0], &[2.0, 3.0, -1.0]]);
        assert_eq!(
            classify_shape(&rows).unwrap(),
            MatrixShape::LowerTriangular
        );
    }

    #[test]
    fn classify_upper_triangular() {
        let rows = opt(&[&[-1.0, 1.0, 2.0], &[-1.0, 3.0], &[-1.0]]);
        assert_eq!(
            classify_shape(&rows).unwrap(),
            MatrixShape::UpperTriangular
        );
    }

    #[test]
    fn classify_degenerate_orders() {
        assert_eq!(classify_shape(&[]).unwrap(), MatrixShape::Square);
        let one = opt(&[&[-1.0]]);
        assert_eq!(classify_shape(&one).unwrap(), MatrixShape::Square);
    }

    #[test]
    fn first_row_wrong_length_is_bad_shape() {
        // Order 3, first row of length 2: no candidate shape fits.
        let rows = opt(&[&[1.0, 2.0], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]);
        assert_eq!(
            classify_shape(&rows),
            Err(BuildError::BadShape {
                order: 3,
                row: 0,
                len: 2
            })
        );
    }

    #[test]
    fn second_row_ambiguity_is_bad_shape() {
        // First row square-or-upper, second row matches neither.
        let rows = opt(&[&[1.0, 2.0, 3.0], &[1.0], &[1.0, 2.0, 3.0]]);
        assert_eq!(
            classify_shape(&rows),
            Err(BuildError::BadShape {
                order: 3,
                row: 1,
                len: 1
            })
        );
    }

    #[test]
    fn progression_deviations_are_bad_shape() {
        // Starts lower-triangular, row 2 is too long.
        let rows = opt(&[&[-1.0], &[1.0, -1.0], &[2.0, 3.0, -1.0, 9.0]]);
        assert_eq!(
            classify_shape(&rows),
            Err(BuildError::BadShape {
                order: 3,
                row: 2,
                len: 4
            })
        );

        // Starts square, last row too short.
        let rows = opt(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[1.0, 2.0]]);
        assert_eq!(
            classify_shape(&rows),
            Err(BuildError::BadShape {
                order: 3,
                row: 2,
                len: 2
            })
        );

        // Starts upper-triangular, middle row deviates.
        let rows = opt(&[&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[1.0]]);
        assert_eq!(
            classify_shape(&rows),
            Err(BuildError::BadShape {
                order: 4,
                row: 2,
                len: 3
            })
        );
    }

    #[test]
    fn negative_weight_is_invalid_element() {
        let rows = vec![vec![None, Some(-2.0)], vec![Some(1.0), None]];
        assert_eq!(
            validate_elements(&rows),
            Err(BuildError::InvalidElement {
                row: 0,
                col: 1,
                value: -2.0
            })
        );
    }

    #[test]
    fn non_finite_weights_are_invalid_elements() {
        let rows = vec![vec![Some(Real::NAN)]];
        assert!(matches!(
            validate_elements(&rows),
            Err(BuildError::InvalidElement { row: 0, col: 0, .. })
        ));

        let rows = vec![vec![Some(Real::INFINITY)]];
        assert!(matches!(
            validate_elements(&rows),
            Err(BuildError::InvalidElement { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn absent_entries_pass_element_validation() {
        let rows = vec![vec![None, Some(0.0)], vec![Some(3.5), None]];
        assert!(validate_elements(&rows).is_ok());
    }

    #[test]
    fn canonical_square_copies_as_is() {
        let rows = opt(&[&[-1.0, 1.0], &[2.0, -1.0]]);
        let m = canonicalize(&rows, MatrixShape::Square);
        assert_eq!(m.order(), 2);
        assert_eq!(m.weight(0, 0), None);
        assert_eq!(m.weight(0, 1), Some(1.0));
        assert_eq!(m.weight(1, 0), Some(2.0));
        // Asymmetry preserved for square input.
        assert_ne!(m.weight(0, 1), m.weight(1, 0));
    }

    #[test]
    fn canonical_lower_matches_manual_mirror() {
        let rows = opt(&[&[-1.0], &[1.0, -1.0], &[-1.0, 2.0, -1.0]]);
        let lower = canonicalize(&rows, MatrixShape::LowerTriangular);
        let square = opt(&[
            &[-1.0, 1.0, -1.0],
            &[1.0, -1.0, 2.0],
            &[-1.0, 2.0, -1.0],
        ]);
        let manual = canonicalize(&square, MatrixShape::Square);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(lower.weight(i, j), manual.weight(i, j));
            }
        }
    }

    #[test]
    fn canonical_upper_matches_manual_mirror() {
        let rows = opt(&[&[-1.0, 1.0, -1.0], &[-1.0, 2.0], &[-1.0]]);
        let upper = canonicalize(&rows, MatrixShape::UpperTriangular);
        let square = opt(&[
            &[-1.0, 1.0, -1.0],
            &[1.0, -1.0, 2.0],
            &[-1.0, 2.0, -1.0],
        ]);
        let manual = canonicalize(&square, MatrixShape::Square);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(upper.weight(i, j), manual.weight(i, j));
            }
        }
    }

    #[test]
    fn adjacency_derives_from_presence_and_excludes_self_loops() {
        // Diagonal carries a stored weight; it must still not be adjacent.
        let rows = opt(&[&[5.0, 1.0, -1.0], &[1.0, -1.0, 2.0], &[-1.0, 2.0, -1.0]]);
        let distances = canonicalize(&rows, MatrixShape::Square);
        let adjacency = AdjacencyMatrix::from_distances(&distances);

        assert!(!adjacency.adjacent(0, 0));
        assert!(adjacency.adjacent(0, 1));
        assert!(adjacency.adjacent(1, 0));
        assert!(!adjacency.adjacent(0, 2));
        assert!(adjacency.adjacent(1, 2));
    }
}
