use crate::error::{SearchError, SearchResult};
use crate::grid::{CellState, Grid, Position};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// What the engine just did, reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A node was popped from the frontier and its neighbors expanded.
    Expanded(Position),
    /// A cell was marked during path reconstruction.
    Traced(Position),
}

/// Receives a callback after every search step.
///
/// Called synchronously; the search resumes when `on_step` returns. Pacing
/// and rendering are the observer's business.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid, step: Step);
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid, Step),
{
    fn on_step(&mut self, grid: &Grid, step: Step) {
        self(grid, step)
    }
}

/// Observer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _grid: &Grid, _step: Step) {}
}

pub trait SearchAlgorithm {
    fn name(&self) -> &'static str;

    /// Searches from `start` to `end`, mutating cell states as it goes.
    ///
    /// Returns `Ok(true)` with the path marked on success, `Ok(false)` when
    /// the frontier is exhausted, and `Err(SearchError::Cancelled)` when
    /// `cancel` reports true at the top of an iteration.
    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        end: Position,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool>;
}

/// Walks `came_from` back from `end`, marking every cell except `start` as
/// `Path` and notifying the observer once per marked cell. `end` is restored
/// to `End` afterwards.
pub fn reconstruct_path(
    grid: &mut Grid,
    came_from: &FxHashMap<Position, Position>,
    start: Position,
    end: Position,
    observer: &mut dyn StepObserver,
) -> SearchResult<()> {
    let mut current = end;
    while current != start {
        grid.set_state(current, CellState::Path)?;
        observer.on_step(grid, Step::Traced(current));
        current = match came_from.get(&current) {
            Some(&previous) => previous,
            None => break,
        };
    }
    grid.set_state(end, CellState::End)
}

/// Container discipline for the uninformed searches.
pub trait Frontier {
    fn push(&mut self, pos: Position);
    fn pop(&mut self) -> Option<Position>;
}

/// Last in, first out.
impl Frontier for Vec<Position> {
    fn push(&mut self, pos: Position) {
        Vec::push(self, pos);
    }

    fn pop(&mut self) -> Option<Position> {
        Vec::pop(self)
    }
}

/// First in, first out.
impl Frontier for VecDeque<Position> {
    fn push(&mut self, pos: Position) {
        self.push_back(pos);
    }

    fn pop(&mut self) -> Option<Position> {
        self.pop_front()
    }
}

/// Traversal shared by depth-first and breadth-first search. Only the
/// frontier container differs between them.
///
/// Cells are marked seen when pushed, so each cell enters the frontier at
/// most once.
pub fn uninformed_search<F: Frontier>(
    mut frontier: F,
    grid: &mut Grid,
    start: Position,
    end: Position,
    observer: &mut dyn StepObserver,
    cancel: &dyn Fn() -> bool,
) -> SearchResult<bool> {
    let rows = grid.rows();
    let mut visited = vec![false; rows * rows];
    let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();

    frontier.push(start);
    visited[start.row * rows + start.col] = true;

    loop {
        if cancel() {
            return Err(SearchError::Cancelled);
        }
        let Some(current) = frontier.pop() else {
            break;
        };

        if current == end {
            reconstruct_path(grid, &came_from, start, end, observer)?;
            return Ok(true);
        }

        let neighbors = grid.neighbors(current)?.to_vec();
        for neighbor in neighbors {
            let index = neighbor.row * rows + neighbor.col;
            if !visited[index] {
                frontier.push(neighbor);
                visited[index] = true;
                came_from.insert(neighbor, current);
                grid.set_state(neighbor, CellState::Frontier)?;
            }
        }

        log::trace!("expanded {}", current);
        observer.on_step(grid, Step::Expanded(current));

        if current != start {
            grid.set_state(current, CellState::Visited)?;
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct_marks_end_to_start_exclusive_of_start() {
        let mut grid = Grid::new(3, 300).unwrap();
        let start = Position::new(0, 0);
        let mid = Position::new(0, 1);
        let end = Position::new(0, 2);
        grid.set_state(start, CellState::Start).unwrap();
        grid.set_state(end, CellState::End).unwrap();

        let mut came_from = FxHashMap::default();
        came_from.insert(mid, start);
        came_from.insert(end, mid);

        let mut traced = Vec::new();
        let mut observer = |_: &Grid, step: Step| traced.push(step);
        reconstruct_path(&mut grid, &came_from, start, end, &mut observer).unwrap();

        assert_eq!(traced, vec![Step::Traced(end), Step::Traced(mid)]);
        assert_eq!(grid.state(start).unwrap(), CellState::Start);
        assert_eq!(grid.state(mid).unwrap(), CellState::Path);
        assert_eq!(grid.state(end).unwrap(), CellState::End);
    }

    #[test]
    fn stack_and_queue_pop_from_opposite_ends() {
        let (a, b) = (Position::new(0, 0), Position::new(0, 1));

        let mut stack: Vec<Position> = Vec::new();
        Frontier::push(&mut stack, a);
        Frontier::push(&mut stack, b);
        assert_eq!(Frontier::pop(&mut stack), Some(b));

        let mut queue: VecDeque<Position> = VecDeque::new();
        Frontier::push(&mut queue, a);
        Frontier::push(&mut queue, b);
        assert_eq!(Frontier::pop(&mut queue), Some(a));
    }
}
