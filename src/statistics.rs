use crate::algorithms::Algorithm;
use crate::grid::{CellState, Grid, Position};
use pathfinding::prelude::astar;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Exhausted,
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found => write!(f, "path found"),
            Outcome::Exhausted => write!(f, "no path"),
            Outcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchStatistics {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    pub expanded: usize,
    pub visited_cells: usize,
    pub frontier_cells: usize,
    /// Edges on the marked path, 0 unless a path was found.
    pub path_length: usize,
    pub optimal_path_length: Option<usize>,
    pub route_efficiency: f64,
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Collects statistics from the grid as the search left it.
    pub fn collect(
        algorithm: Algorithm,
        outcome: Outcome,
        grid: &Grid,
        expanded: usize,
        optimal_path_length: Option<usize>,
        elapsed: Duration,
    ) -> Self {
        let path_length = if outcome == Outcome::Found {
            grid.count(CellState::Path) + 1
        } else {
            0
        };

        let mut stats = SearchStatistics {
            algorithm,
            outcome,
            expanded,
            visited_cells: grid.count(CellState::Visited),
            frontier_cells: grid.count(CellState::Frontier),
            path_length,
            optimal_path_length,
            route_efficiency: 0.0,
            elapsed,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Ratio of the found path to the shortest one; 1.0 is optimal.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_path_length {
            Some(optimal) if self.path_length > 0 && optimal > 0 => {
                self.path_length as f64 / optimal as f64
            }
            _ => 0.0,
        };
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Outcome: {}", self.outcome)?;
        writeln!(f, "Expanded Nodes: {}", self.expanded)?;
        writeln!(f, "Visited Cells: {}", self.visited_cells)?;
        writeln!(f, "Frontier Cells: {}", self.frontier_cells)?;
        writeln!(f, "Path Length: {}", self.path_length)?;
        match self.optimal_path_length {
            Some(optimal) => writeln!(f, "Optimal Path Length: {}", optimal)?,
            None => writeln!(f, "Optimal Path Length: unreachable")?,
        }
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Shortest path length in edges from `start` to `end`, computed from the
/// barrier layout with the `pathfinding` crate rather than the grid's cached
/// neighbor lists. `None` when the end is unreachable.
pub fn reference_path_length(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    let rows = grid.rows();
    let open = |pos: &Position| {
        grid.state(*pos)
            .map(|state| state != CellState::Barrier)
            .unwrap_or(false)
    };

    let result = astar(
        &start,
        |p| {
            let mut successors = Vec::with_capacity(4);
            if p.row + 1 < rows {
                successors.push(Position::new(p.row + 1, p.col));
            }
            if p.row > 0 {
                successors.push(Position::new(p.row - 1, p.col));
            }
            if p.col + 1 < rows {
                successors.push(Position::new(p.row, p.col + 1));
            }
            if p.col > 0 {
                successors.push(Position::new(p.row, p.col - 1));
            }
            successors
                .into_iter()
                .filter(|n| open(n))
                .map(|n| (n, 1u32))
                .collect::<Vec<_>>()
        },
        |p| p.manhattan(&end),
        |p| *p == end,
    );

    result.map(|(_, cost)| cost as usize)
}
