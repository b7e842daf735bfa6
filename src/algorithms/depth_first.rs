use crate::algorithms::common::{uninformed_search, SearchAlgorithm, StepObserver};
use crate::error::SearchResult;
use crate::grid::{Grid, Position};

/// Depth-first search over a stack. Finds a path when one exists, with no
/// guarantee that it is the shortest.
#[derive(Default)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl SearchAlgorithm for DepthFirst {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        end: Position,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool> {
        let stack: Vec<Position> = Vec::new();
        uninformed_search(stack, grid, start, end, observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::Step;
    use crate::grid::CellState;

    #[test]
    fn follows_the_last_pushed_neighbor_first() {
        let mut grid = Grid::new(3, 300).unwrap();
        grid.refresh_neighbors();

        let mut expanded = Vec::new();
        let mut observer = |_: &Grid, step: Step| {
            if let Step::Expanded(pos) = step {
                expanded.push(pos);
            }
        };
        let found = DepthFirst::new()
            .search(
                &mut grid,
                Position::new(0, 0),
                Position::new(2, 2),
                &mut observer,
                &|| false,
            )
            .unwrap();

        assert!(found);
        // Right is pushed after down, so the search runs along row 0 first.
        assert_eq!(
            &expanded[..3],
            &[Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
        assert_eq!(grid.state(Position::new(2, 2)).unwrap(), CellState::End);
    }
}
