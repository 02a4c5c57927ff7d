//! On-disk maze format.
//!
//! A maze file is a list of equal-length strings, one character per cell:
//! `.` open, `#` wall, `?` not yet known, `S` the start (open), `E` the
//! exit (open). Exactly one start is required; the exit is optional.

use serde::{Deserialize, Serialize};

use crate::map::MazeMap;
use crate::MazeResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeFile {
    #[serde(default)]
    pub name: Option<String>,
    pub grid: Vec<String>,
}

impl MazeFile {
    pub fn to_map(&self) -> MazeResult<MazeMap> {
        MazeMap::parse(&self.grid)
    }
}
