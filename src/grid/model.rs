use crate::foundation::core::Coord;
use crate::foundation::error::{MazeViewError, MazeViewResult};

/// One of the four wall slots of a cell, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    North,
    East,
    South,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::East, Wall::South, Wall::West];

    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

/// A single grid position with four directional wall slots.
///
/// `row`, `col` and `visited` from the generator's wire format are accepted and ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    /// Wall presence ordered North, East, South, West.
    pub walls: [bool; 4],
    /// Stroke weight per wall, same order as `walls`. Only affects color.
    pub wall_weights: [u32; 4],
}

impl Cell {
    /// A cell walled on all four sides with weight 0.
    pub fn closed() -> Self {
        Self {
            walls: [true; 4],
            wall_weights: [0; 4],
        }
    }

    pub fn has_wall(&self, wall: Wall) -> bool {
        self.walls[wall.index()]
    }

    pub fn weight(&self, wall: Wall) -> u32 {
        self.wall_weights[wall.index()]
    }

    /// Present walls with their weights.
    pub fn present_walls(&self) -> impl Iterator<Item = (Wall, u32)> + '_ {
        Wall::ALL
            .into_iter()
            .filter(|w| self.has_wall(*w))
            .map(|w| (w, self.weight(w)))
    }
}

/// Start and end markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Endpoints {
    pub start: Coord,
    pub end: Coord,
}

/// The maze grid as produced by the generator: `rows x cols` cells plus endpoints.
///
/// The viewer never mutates a grid. Endpoint overrides for interactive solve setup are passed
/// at render time instead (see [`Grid::endpoints_with`]).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<Cell>>,
    pub start: Coord,
    pub end: Coord,
}

impl Grid {
    /// Build a grid of fully closed cells. Fails on zero dimensions or out-of-range endpoints.
    pub fn closed(rows: usize, cols: usize, start: Coord, end: Coord) -> MazeViewResult<Self> {
        let grid = Self {
            id: None,
            rows,
            cols,
            grid: vec![vec![Cell::closed(); cols]; rows],
            start,
            end,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Parse and validate the generator's JSON shape.
    pub fn from_json_str(s: &str) -> MazeViewResult<Self> {
        let grid: Self = serde_json::from_str(s)?;
        grid.validate()?;
        Ok(grid)
    }

    /// Parse and validate from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MazeViewResult<Self> {
        let grid: Self = serde_json::from_reader(r)?;
        grid.validate()?;
        Ok(grid)
    }

    /// Check the structural invariants the renderer relies on.
    ///
    /// This is a precondition check, not maze validation: connectivity and wall symmetry
    /// between neighbours are not inspected.
    pub fn validate(&self) -> MazeViewResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeViewError::validation("grid rows and cols must be >= 1"));
        }
        if self.grid.len() != self.rows {
            return Err(MazeViewError::validation(format!(
                "grid has {} rows, expected {}",
                self.grid.len(),
                self.rows
            )));
        }
        for (r, row) in self.grid.iter().enumerate() {
            if row.len() != self.cols {
                return Err(MazeViewError::validation(format!(
                    "grid row {r} has {} cells, expected {}",
                    row.len(),
                    self.cols
                )));
            }
        }
        for (name, c) in [("start", self.start), ("end", self.end)] {
            if !c.in_bounds(self.rows, self.cols) {
                return Err(MazeViewError::validation(format!(
                    "{name} ({}, {}) is outside the {}x{} grid",
                    c.row, c.col, self.rows, self.cols
                )));
            }
        }
        Ok(())
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.grid.get(at.row).and_then(|row| row.get(at.col))
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            start: self.start,
            end: self.end,
        }
    }

    /// Stored endpoints, replaced by `overrides` when given. Overrides must be in range.
    pub fn endpoints_with(&self, overrides: Option<Endpoints>) -> MazeViewResult<Endpoints> {
        let Some(ep) = overrides else {
            return Ok(self.endpoints());
        };
        for (name, c) in [("start", ep.start), ("end", ep.end)] {
            if !c.in_bounds(self.rows, self.cols) {
                return Err(MazeViewError::validation(format!(
                    "{name} override ({}, {}) is outside the {}x{} grid",
                    c.row, c.col, self.rows, self.cols
                )));
            }
        }
        Ok(ep)
    }

    /// Copy of this grid with the given endpoints stored, used when persisting a solve setup.
    pub fn with_endpoints(&self, ep: Endpoints) -> MazeViewResult<Self> {
        let ep = self.endpoints_with(Some(ep))?;
        Ok(Self {
            start: ep.start,
            end: ep.end,
            ..self.clone()
        })
    }

    /// Logical extent in content units for a given cell size.
    pub fn extent(&self, cell_size: f64) -> (f64, f64) {
        (self.cols as f64 * cell_size, self.rows as f64 * cell_size)
    }

    /// Error if any coordinate lies outside the grid.
    pub fn check_coords(&self, what: &str, coords: &[Coord]) -> MazeViewResult<()> {
        match coords
            .iter()
            .position(|c| !c.in_bounds(self.rows, self.cols))
        {
            Some(i) => Err(MazeViewError::animation(format!(
                "{what}[{i}] = ({}, {}) is outside the {}x{} grid",
                coords[i].row, coords[i].col, self.rows, self.cols
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
