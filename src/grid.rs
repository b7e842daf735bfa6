use crate::error::{SearchError, SearchResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: &Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Logical state of a cell. Presentation layers choose their own mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    Frontier,
    Visited,
    Path,
}

impl CellState {
    /// Single-character glyph used by the terminal renderer.
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Barrier => '#',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    state: CellState,
    neighbors: Vec<Position>,
    x: u32,
    y: u32,
    width: u32,
}

impl Cell {
    fn new(position: Position, width: u32) -> Self {
        Cell {
            position,
            state: CellState::Empty,
            neighbors: Vec::new(),
            x: position.row as u32 * width,
            y: position.col as u32 * width,
            width,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Neighbors as of the last [`Grid::refresh_neighbors`].
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }

    /// Pixel origin of the cell, for renderers.
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    fn reset(&mut self) {
        self.state = CellState::Empty;
        self.neighbors.clear();
    }
}

/// Square grid of cells indexed `[row][col]`.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    width: u32,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a `rows x rows` grid of empty cells. `total_width` is the pixel
    /// width of the whole grid and only feeds cell geometry.
    pub fn new(rows: usize, total_width: u32) -> SearchResult<Self> {
        if rows == 0 || (total_width as usize) < rows {
            return Err(SearchError::InvalidDimensions { rows });
        }
        let gap = total_width / rows as u32;
        let cells = (0..rows)
            .map(|row| {
                (0..rows)
                    .map(|col| Cell::new(Position::new(row, col), gap))
                    .collect()
            })
            .collect();

        Ok(Grid {
            rows,
            width: total_width,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel size of one cell.
    pub fn gap(&self) -> u32 {
        self.width / self.rows as u32
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.rows
    }

    fn check(&self, pos: Position) -> SearchResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(SearchError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
            })
        }
    }

    pub fn cell_at(&self, pos: Position) -> SearchResult<&Cell> {
        self.check(pos)?;
        Ok(&self.cells[pos.row][pos.col])
    }

    pub fn cell_at_mut(&mut self, pos: Position) -> SearchResult<&mut Cell> {
        self.check(pos)?;
        Ok(&mut self.cells[pos.row][pos.col])
    }

    pub fn state(&self, pos: Position) -> SearchResult<CellState> {
        self.cell_at(pos).map(Cell::state)
    }

    pub fn set_state(&mut self, pos: Position, state: CellState) -> SearchResult<()> {
        self.cell_at_mut(pos)?.set_state(state);
        Ok(())
    }

    pub fn neighbors(&self, pos: Position) -> SearchResult<&[Position]> {
        self.cell_at(pos).map(Cell::neighbors)
    }

    /// Iterates all cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells().filter(|cell| cell.state == state).count()
    }

    /// Maps a pixel coordinate to the cell under it.
    pub fn position_at_pixel(&self, x: u32, y: u32) -> SearchResult<Position> {
        let gap = self.gap();
        let pos = Position::new((x / gap) as usize, (y / gap) as usize);
        self.check(pos)?;
        Ok(pos)
    }

    /// Recomputes every non-barrier cell's 4-connected neighbor list.
    ///
    /// Enumeration order is down, up, right, left. Barrier cells end up with
    /// an empty list.
    pub fn refresh_neighbors(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.rows {
                let neighbors = if self.cells[row][col].is_barrier() {
                    Vec::new()
                } else {
                    self.open_neighbors(Position::new(row, col))
                };
                self.cells[row][col].neighbors = neighbors;
            }
        }
    }

    fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        let (row, col) = (pos.row, pos.col);

        if row + 1 < self.rows && !self.cells[row + 1][col].is_barrier() {
            neighbors.push(Position::new(row + 1, col));
        }
        if row > 0 && !self.cells[row - 1][col].is_barrier() {
            neighbors.push(Position::new(row - 1, col));
        }
        if col + 1 < self.rows && !self.cells[row][col + 1].is_barrier() {
            neighbors.push(Position::new(row, col + 1));
        }
        if col > 0 && !self.cells[row][col - 1].is_barrier() {
            neighbors.push(Position::new(row, col - 1));
        }
        neighbors
    }

    /// Resets every cell to `Empty` and drops cached neighbors.
    pub fn clear(&mut self) {
        self.cells.iter_mut().flatten().for_each(Cell::reset);
    }

    /// Resets search marks (`Frontier`, `Visited`, `Path`) and keeps the
    /// painted layout.
    pub fn clear_search(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if matches!(
                cell.state,
                CellState::Frontier | CellState::Visited | CellState::Path
            ) {
                cell.state = CellState::Empty;
            }
        }
    }

    /// Print the grid with a legend. Rows run top to bottom.
    pub fn print_grid(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Legend: S=Start, E=End, #=Barrier, o=Frontier, x=Visited, *=Path, .=Empty"
        )?;

        write!(f, "   ")?;
        for col in 0..self.rows {
            write!(f, "{:2}", col % 10)?;
        }
        writeln!(f)?;

        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", row)?;
            for cell in cells {
                write!(f, "{} ", cell.state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize) -> Grid {
        Grid::new(rows, 800).unwrap()
    }

    #[test]
    fn new_rejects_zero_rows() {
        assert_eq!(
            Grid::new(0, 800).unwrap_err(),
            SearchError::InvalidDimensions { rows: 0 }
        );
    }

    #[test]
    fn cells_carry_their_coordinates_and_geometry() {
        let g = grid(50);
        let cell = g.cell_at(Position::new(3, 7)).unwrap();
        assert_eq!(cell.position(), Position::new(3, 7));
        assert_eq!(cell.width(), 16);
        assert_eq!(cell.origin(), (48, 112));
        assert_eq!(cell.state(), CellState::Empty);
    }

    #[test]
    fn cell_at_is_bounds_checked() {
        let g = grid(5);
        assert_eq!(
            g.cell_at(Position::new(5, 0)).unwrap_err(),
            SearchError::OutOfBounds { row: 5, col: 0, rows: 5 }
        );
        assert!(g.cell_at(Position::new(4, 4)).is_ok());
    }

    #[test]
    fn neighbors_follow_down_up_right_left_order() {
        let mut g = grid(3);
        g.refresh_neighbors();
        assert_eq!(
            g.neighbors(Position::new(1, 1)).unwrap(),
            &[
                Position::new(2, 1),
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(1, 0),
            ]
        );
        assert_eq!(
            g.neighbors(Position::new(0, 0)).unwrap(),
            &[Position::new(1, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn barriers_are_excluded_from_neighbors() {
        let mut g = grid(3);
        g.set_state(Position::new(1, 0), CellState::Barrier).unwrap();
        g.refresh_neighbors();
        assert_eq!(
            g.neighbors(Position::new(0, 0)).unwrap(),
            &[Position::new(0, 1)]
        );
        assert!(g.neighbors(Position::new(1, 0)).unwrap().is_empty());
    }

    #[test]
    fn neighbors_are_stale_until_refreshed() {
        let mut g = grid(3);
        g.refresh_neighbors();
        g.set_state(Position::new(0, 1), CellState::Barrier).unwrap();
        assert_eq!(g.neighbors(Position::new(0, 0)).unwrap().len(), 2);
        g.refresh_neighbors();
        assert_eq!(g.neighbors(Position::new(0, 0)).unwrap().len(), 1);
    }

    #[test]
    fn pixel_lookup_maps_x_to_row() {
        let g = grid(50);
        assert_eq!(g.position_at_pixel(40, 790).unwrap(), Position::new(2, 49));
        assert!(matches!(
            g.position_at_pixel(800, 0),
            Err(SearchError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn clear_search_keeps_layout() {
        let mut g = grid(3);
        g.set_state(Position::new(0, 0), CellState::Start).unwrap();
        g.set_state(Position::new(1, 1), CellState::Barrier).unwrap();
        g.set_state(Position::new(2, 2), CellState::Visited).unwrap();
        g.clear_search();
        assert_eq!(g.state(Position::new(0, 0)).unwrap(), CellState::Start);
        assert_eq!(g.state(Position::new(1, 1)).unwrap(), CellState::Barrier);
        assert_eq!(g.state(Position::new(2, 2)).unwrap(), CellState::Empty);

        g.clear();
        assert_eq!(g.count(CellState::Empty), 9);
    }
}
