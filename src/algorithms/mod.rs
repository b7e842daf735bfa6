pub mod a_star;
pub mod breadth_first;
pub mod common;
pub mod depth_first;

use crate::error::{SearchError, SearchResult};
use crate::grid::{CellState, Grid, Position};
use a_star::AStar;
use breadth_first::BreadthFirst;
use common::{SearchAlgorithm, StepObserver};
use depth_first::DepthFirst;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    HeuristicBestFirst,
    DepthFirst,
    BreadthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::HeuristicBestFirst,
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
    ];

    pub fn create(self) -> Box<dyn SearchAlgorithm> {
        match self {
            Algorithm::HeuristicBestFirst => Box::new(AStar::new()),
            Algorithm::DepthFirst => Box::new(DepthFirst::new()),
            Algorithm::BreadthFirst => Box::new(BreadthFirst::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::HeuristicBestFirst => "a_star",
            Algorithm::DepthFirst => "dfs",
            Algorithm::BreadthFirst => "bfs",
        };
        f.write_str(name)
    }
}

/// Single entry point for running a search over a grid.
pub struct SearchEngine;

impl SearchEngine {
    /// Validates the run and dispatches to the requested algorithm.
    ///
    /// The grid's neighbor lists must already reflect its barriers; call
    /// [`Grid::refresh_neighbors`] after painting and before running.
    pub fn run(
        algorithm: Algorithm,
        grid: &mut Grid,
        start: Position,
        end: Position,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool> {
        Self::validate(grid, start, end)?;

        let mut search = algorithm.create();
        log::debug!("running {} from {} to {}", search.name(), start, end);

        match search.search(grid, start, end, observer, cancel) {
            Ok(found) => {
                log::info!("{} finished: path found = {}", search.name(), found);
                Ok(found)
            }
            Err(SearchError::Cancelled) => {
                log::warn!("{} cancelled", search.name());
                Err(SearchError::Cancelled)
            }
            Err(e) => Err(e),
        }
    }

    fn validate(grid: &Grid, start: Position, end: Position) -> SearchResult<()> {
        let start_state = grid.state(start)?;
        let end_state = grid.state(end)?;

        if start == end {
            return Err(SearchError::InvalidRun(format!(
                "start and end are the same cell {}",
                start
            )));
        }
        if start_state == CellState::Barrier {
            return Err(SearchError::InvalidRun(format!("start {} is a barrier", start)));
        }
        if end_state == CellState::Barrier {
            return Err(SearchError::InvalidRun(format!("end {} is a barrier", end)));
        }
        Ok(())
    }
}
