use crate::algorithms::common::{reconstruct_path, SearchAlgorithm, Step, StepObserver};
use crate::error::{SearchError, SearchResult};
use crate::grid::{CellState, Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry ordered by ascending `f`, then by insertion order.
/// `BinaryHeap` is a max-heap, so `Ord` is reversed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct QueueEntry {
    f: u32,
    count: u64,
    pos: Position,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.f.cmp(&self.f) {
            Ordering::Equal => other.count.cmp(&self.count),
            other => other,
        }
    }
}

/// Best-first shortest-path search guided by the Manhattan distance to the
/// end. Every edge costs 1.
#[derive(Default)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }

    fn heuristic(from: Position, to: Position) -> u32 {
        from.manhattan(&to)
    }
}

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        end: Position,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool> {
        let mut count = 0u64;
        let mut open_set = BinaryHeap::new();
        open_set.push(QueueEntry {
            f: 0,
            count,
            pos: start,
        });
        let mut open_set_hash: FxHashSet<Position> = FxHashSet::default();
        open_set_hash.insert(start);

        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();
        // Missing entries are +infinity.
        let mut g_score: FxHashMap<Position, u32> = FxHashMap::default();
        let mut f_score: FxHashMap<Position, u32> = FxHashMap::default();
        g_score.insert(start, 0);
        f_score.insert(start, Self::heuristic(start, end));

        loop {
            if cancel() {
                return Err(SearchError::Cancelled);
            }
            let Some(QueueEntry { pos: current, .. }) = open_set.pop() else {
                break;
            };
            open_set_hash.remove(&current);

            if current == end {
                reconstruct_path(grid, &came_from, start, end, observer)?;
                return Ok(true);
            }

            let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
            let neighbors = grid.neighbors(current)?.to_vec();
            for neighbor in neighbors {
                let tentative_g = current_g.saturating_add(1);
                if tentative_g < g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                    let f = tentative_g + Self::heuristic(neighbor, end);
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    f_score.insert(neighbor, f);

                    if open_set_hash.insert(neighbor) {
                        count += 1;
                        open_set.push(QueueEntry {
                            f,
                            count,
                            pos: neighbor,
                        });
                        grid.set_state(neighbor, CellState::Frontier)?;
                    }
                }
            }

            log::trace!(
                "expanded {} g={} f={}",
                current,
                current_g,
                f_score.get(&current).copied().unwrap_or(u32::MAX)
            );
            observer.on_step(grid, Step::Expanded(current));

            if current != start {
                grid.set_state(current, CellState::Visited)?;
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::NoopObserver;

    #[test]
    fn queue_pops_lowest_f_then_oldest() {
        let p = Position::new(0, 0);
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { f: 5, count: 1, pos: p });
        heap.push(QueueEntry { f: 3, count: 3, pos: p });
        heap.push(QueueEntry { f: 3, count: 2, pos: p });

        let order: Vec<(u32, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.f, e.count))
            .collect();
        assert_eq!(order, vec![(3, 2), (3, 3), (5, 1)]);
    }

    #[test]
    fn straight_corridor_expands_only_along_the_way() {
        let mut grid = Grid::new(5, 500).unwrap();
        let start = Position::new(0, 0);
        let end = Position::new(0, 4);
        grid.refresh_neighbors();

        let mut expanded = Vec::new();
        let mut observer = |_: &Grid, step: Step| {
            if let Step::Expanded(pos) = step {
                expanded.push(pos);
            }
        };
        let found = AStar::new()
            .search(&mut grid, start, end, &mut observer, &|| false)
            .unwrap();

        assert!(found);
        assert_eq!(
            expanded,
            (0..4).map(|col| Position::new(0, col)).collect::<Vec<_>>()
        );
        assert_eq!(grid.count(CellState::Path), 3);
    }

    #[test]
    fn detours_around_a_wall() {
        let mut grid = Grid::new(5, 500).unwrap();
        for row in 0..4 {
            grid.set_state(Position::new(row, 2), CellState::Barrier).unwrap();
        }
        grid.refresh_neighbors();

        let found = AStar::new()
            .search(
                &mut grid,
                Position::new(0, 0),
                Position::new(0, 4),
                &mut NoopObserver,
                &|| false,
            )
            .unwrap();

        assert!(found);
        // Down four, across four, up four.
        assert_eq!(grid.count(CellState::Path) + 1, 12);
        assert_eq!(grid.state(Position::new(0, 0)).unwrap(), CellState::Empty);
    }
}
