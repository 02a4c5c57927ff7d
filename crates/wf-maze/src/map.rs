//! Grid maze model and its graph view.
//!
//! Cell labels are fixed as `row * width + col`, independent of how much
//! of the maze is currently known. A partially-explored copy of a maze
//! therefore shares labels with the full map, and routes planned on the
//! known part stay meaningful as more cells are revealed.

use tracing::debug;

use wf_core::Real;
use wf_graph::{Graph, Label};

use crate::{MazeError, MazeResult};

/// One grid cell as currently known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Unknown,
}

/// Rectangular maze grid with one start cell and an optional exit.
#[derive(Debug, Clone)]
pub struct MazeMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Label,
    exit: Option<Label>,
}

impl MazeMap {
    /// Parse a grid of equal-length rows.
    ///
    /// `.` open, `#` wall, `?` unknown, `S` start (open, required, unique),
    /// `E` exit (open, optional, unique).
    pub fn parse(grid: &[String]) -> MazeResult<Self> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(MazeError::EmptyGrid);
        }
        let height = grid.len();
        let width = grid[0].chars().count();
        let total = width
            .checked_mul(height)
            .ok_or(MazeError::GridTooLarge { width, height })?;
        if u32::try_from(total).is_err() {
            return Err(MazeError::GridTooLarge { width, height });
        }

        let mut cells = Vec::with_capacity(total);
        let mut start = None;
        let mut exit = None;
        for (row, line) in grid.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let label = (row * width + col) as Label;
                let cell = match ch {
                    '.' => Cell::Open,
                    '#' => Cell::Wall,
                    '?' => Cell::Unknown,
                    'S' => {
                        if start.replace(label).is_some() {
                            return Err(MazeError::DuplicateStart);
                        }
                        Cell::Open
                    }
                    'E' => {
                        if exit.replace(label).is_some() {
                            return Err(MazeError::DuplicateExit);
                        }
                        Cell::Open
                    }
                    other => return Err(MazeError::BadCell {
                        row,
                        col,
                        ch: other,
                    }),
                };
                cells.push(cell);
            }
        }
        let start = start.ok_or(MazeError::MissingStart)?;

        Ok(Self {
            width,
            height,
            cells,
            start,
            exit,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Label {
        self.start
    }

    pub fn exit(&self) -> Option<Label> {
        self.exit
    }

    pub fn label_at(&self, row: usize, col: usize) -> Label {
        (row * self.width + col) as Label
    }

    pub fn coords(&self, label: Label) -> (usize, usize) {
        let index = label as usize;
        (index / self.width, index % self.width)
    }

    /// Cell at the given position. Row and column must be in bounds.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) == Cell::Open
    }

    /// In-bounds 4-neighbours, in ascending label order.
    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (width, height) = (self.width, self.height);
        [
            (row.wrapping_sub(1), col),
            (row, col.wrapping_sub(1)),
            (row, col + 1),
            (row + 1, col),
        ]
        .into_iter()
        .filter(move |&(r, c)| r < height && c < width)
    }

    /// Labels of all open cells, ascending.
    pub fn open_labels(&self) -> Vec<Label> {
        let mut labels = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.is_open(row, col) {
                    labels.push(self.label_at(row, col));
                }
            }
        }
        labels
    }

    /// Open cells bordering at least one unknown cell, ascending.
    ///
    /// These are the places where exploration can make progress.
    pub fn frontier(&self) -> Vec<Label> {
        let mut frontier = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_open(row, col) {
                    continue;
                }
                if self
                    .neighbors(row, col)
                    .any(|(r, c)| self.cell(r, c) == Cell::Unknown)
                {
                    frontier.push(self.label_at(row, col));
                }
            }
        }
        frontier
    }

    /// Graph over the open cells: unit-weight edges between orthogonally
    /// adjacent open cells, labelled by grid position.
    ///
    /// Unknown cells are not vertices; a route can only cross ground that
    /// is already known to be open.
    pub fn to_graph(&self) -> MazeResult<Graph> {
        let labels = self.open_labels();
        let mut rows: Vec<Vec<Option<Real>>> = Vec::with_capacity(labels.len());
        for (i, &label) in labels.iter().enumerate() {
            let (row, col) = self.coords(label);
            let mut weights = vec![None; i + 1];
            for (r, c) in self.neighbors(row, col) {
                if !self.is_open(r, c) {
                    continue;
                }
                let neighbor = self.label_at(r, c);
                if neighbor < label {
                    if let Ok(j) = labels[..i].binary_search(&neighbor) {
                        weights[j] = Some(1.0);
                    }
                }
            }
            rows.push(weights);
        }

        let graph = Graph::from_matrix(&rows, &labels)?;
        debug!(
            width = self.width,
            height = self.height,
            order = graph.order(),
            "maze graph built"
        );
        Ok(graph)
    }

    /// A fully-fogged copy of this maze: every cell unknown except the
    /// start, with the exit hidden until revealed.
    pub fn unexplored(&self) -> MazeMap {
        let mut cells = vec![Cell::Unknown; self.cells.len()];
        cells[self.start as usize] = Cell::Open;
        MazeMap {
            width: self.width,
            height: self.height,
            cells,
            start: self.start,
            exit: None,
        }
    }

    /// Reveal the cell at `at` and its 4-neighbourhood from the true map.
    ///
    /// `truth` must have the same dimensions as this map. Revealing the
    /// exit cell records the exit.
    pub fn reveal(&mut self, truth: &MazeMap, at: Label) {
        let (row, col) = self.coords(at);
        if row >= self.height || col >= self.width {
            return;
        }
        self.reveal_cell(truth, row, col);
        let around: Vec<_> = self.neighbors(row, col).collect();
        for (r, c) in around {
            self.reveal_cell(truth, r, c);
        }
    }

    fn reveal_cell(&mut self, truth: &MazeMap, row: usize, col: usize) {
        let index = row * self.width + col;
        self.cells[index] = truth.cells[index];
        let label = self.label_at(row, col);
        if truth.exit == Some(label) {
            self.exit = Some(label);
        }
    }

    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Unknown).count()
    }

    /// Render the grid back to its textual form, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let label = self.label_at(row, col);
                let ch = if label == self.start {
                    'S'
                } else if self.exit == Some(label) {
                    'E'
                } else {
                    match self.cell(row, col) {
                        Cell::Open => '.',
                        Cell::Wall => '#',
                        Cell::Unknown => '?',
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
