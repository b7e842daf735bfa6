use crate::algorithms::common::{uninformed_search, SearchAlgorithm, StepObserver};
use crate::error::SearchResult;
use crate::grid::{Grid, Position};
use std::collections::VecDeque;

/// Breadth-first search over a FIFO queue. Paths are shortest in edge count.
#[derive(Default)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        end: Position,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool> {
        let queue: VecDeque<Position> = VecDeque::new();
        uninformed_search(queue, grid, start, end, observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::Step;

    #[test]
    fn expands_in_rings_of_increasing_distance() {
        let mut grid = Grid::new(4, 400).unwrap();
        grid.refresh_neighbors();
        let start = Position::new(0, 0);

        let mut distances = Vec::new();
        let mut observer = |_: &Grid, step: Step| {
            if let Step::Expanded(pos) = step {
                distances.push(pos.manhattan(&start));
            }
        };
        let found = BreadthFirst::new()
            .search(&mut grid, start, Position::new(3, 3), &mut observer, &|| false)
            .unwrap();

        assert!(found);
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
