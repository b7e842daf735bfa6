use crate::algorithms::common::{Step, StepObserver};
use crate::algorithms::{Algorithm, SearchEngine};
use crate::config::Config;
use crate::error::{SearchError, SearchResult};
use crate::grid::{CellState, Grid, Position};
use crate::statistics::{reference_path_length, Outcome, SearchStatistics};
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct EnvironmentSetup {
    pub grid_size: usize,
    pub width: u32,
    pub start: Position,
    pub end: Position,
    pub barriers: HashSet<Position>,
}

impl EnvironmentSetup {
    /// Generate a random layout. Start lands in the top-left quadrant, end
    /// in the bottom-right one; barriers never cover either.
    pub fn generate(config: &Config, seed: Option<u64>) -> SearchResult<Self> {
        let size = config.grid_size;
        if size < 2 {
            return Err(SearchError::InvalidDimensions { rows: size });
        }

        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let half = size / 2;
        let start = Position::new(rng.gen_range(0..half), rng.gen_range(0..half));
        let end = Position::new(rng.gen_range(half..size), rng.gen_range(half..size));

        let mut barriers = HashSet::new();
        let mut attempts = 0;
        while barriers.len() < config.num_barriers && attempts < config.num_barriers * 3 {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if pos != start && pos != end {
                barriers.insert(pos);
            }
            attempts += 1;
        }

        log::debug!(
            "generated environment: start {}, end {}, {} barriers",
            start,
            end,
            barriers.len()
        );

        Ok(EnvironmentSetup {
            grid_size: size,
            width: config.width,
            start,
            end,
            barriers,
        })
    }

    /// Paint this layout onto a fresh session.
    pub fn create_simulation(&self) -> SearchResult<Simulation> {
        let mut simulation = Simulation::new(self.grid_size, self.width)?;
        simulation.paint(self.start)?;
        simulation.paint(self.end)?;
        for &barrier in &self.barriers {
            simulation.paint(barrier)?;
        }
        Ok(simulation)
    }
}

/// A painting session: the grid plus its start and end cells.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    start: Option<Position>,
    end: Option<Position>,
}

impl Simulation {
    pub fn new(rows: usize, width: u32) -> SearchResult<Self> {
        Ok(Simulation {
            grid: Grid::new(rows, width)?,
            start: None,
            end: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Primary paint: the first free click places the start, the next one
    /// the end, and later clicks place barriers. Start and end are never
    /// painted over. Returns the state the cell ended up in.
    pub fn paint(&mut self, pos: Position) -> SearchResult<CellState> {
        let cell = self.grid.cell_at_mut(pos)?;

        if self.start.is_none() && self.end != Some(pos) {
            self.start = Some(pos);
            cell.set_state(CellState::Start);
        } else if self.end.is_none() && self.start != Some(pos) {
            self.end = Some(pos);
            cell.set_state(CellState::End);
        } else if self.start != Some(pos) && self.end != Some(pos) {
            cell.set_state(CellState::Barrier);
        }
        Ok(cell.state())
    }

    /// Reset a cell to empty, dropping it as start or end.
    pub fn erase(&mut self, pos: Position) -> SearchResult<()> {
        self.grid.set_state(pos, CellState::Empty)?;
        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.start = None;
        self.end = None;
    }

    fn endpoints(&self) -> SearchResult<(Position, Position)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(SearchError::InvalidRun("start is not set".to_string())),
            (_, None) => Err(SearchError::InvalidRun("end is not set".to_string())),
        }
    }

    /// Wipe marks from a previous run, refresh neighbors and search.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        observer: &mut dyn StepObserver,
        cancel: &dyn Fn() -> bool,
    ) -> SearchResult<bool> {
        let (start, end) = self.endpoints()?;

        self.grid.clear_search();
        self.grid.set_state(start, CellState::Start)?;
        self.grid.set_state(end, CellState::End)?;
        self.grid.refresh_neighbors();

        SearchEngine::run(algorithm, &mut self.grid, start, end, observer, cancel)
    }

    /// Run with the given renderer and gather statistics. A cancelled run
    /// is reported as [`Outcome::Cancelled`] instead of an error.
    pub fn run_with_statistics(
        &mut self,
        algorithm: Algorithm,
        renderer: &mut TerminalRenderer,
    ) -> SearchResult<SearchStatistics> {
        let (start, end) = self.endpoints()?;
        let optimal_path_length = reference_path_length(&self.grid, start, end);

        let cancelled = renderer.cancel_flag();
        let cancel = move || cancelled.get();

        let started = Instant::now();
        let outcome = match self.run(algorithm, &mut *renderer, &cancel) {
            Ok(true) => Outcome::Found,
            Ok(false) => Outcome::Exhausted,
            Err(SearchError::Cancelled) => Outcome::Cancelled,
            Err(e) => return Err(e),
        };
        let elapsed = started.elapsed();

        Ok(SearchStatistics::collect(
            algorithm,
            outcome,
            &self.grid,
            renderer.steps(),
            optimal_path_length,
            elapsed,
        ))
    }

    /// Run one algorithm on a generated environment.
    pub fn run_single(config: &Config, algorithm: Algorithm) -> SearchResult<SearchStatistics> {
        let environment = EnvironmentSetup::generate(config, config.seed)?;
        let mut simulation = environment.create_simulation()?;
        let mut renderer = TerminalRenderer::new(algorithm, config);

        let stats = simulation.run_with_statistics(algorithm, &mut renderer)?;

        if !config.no_visualization {
            renderer.clear_screen();
            println!("=== SEARCH COMPLETE ===");
            simulation.grid().print_grid();
        }
        Ok(stats)
    }

    /// Run every algorithm on clones of one environment.
    pub fn run_all_algorithms(config: &Config) -> SearchResult<Vec<SearchStatistics>> {
        let run_seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let environment = EnvironmentSetup::generate(config, Some(run_seed))?;
        let base = environment.create_simulation()?;

        println!("Running comparison of {} algorithms...", Algorithm::ALL.len());
        println!("Environment seed: {} (for reproducibility)", run_seed);
        println!(
            "Grid {}x{}, Barriers: {}, Start: {}, End: {}",
            environment.grid_size,
            environment.grid_size,
            environment.barriers.len(),
            environment.start,
            environment.end
        );
        println!();

        let mut quiet = config.clone();
        quiet.no_visualization = true;

        let mut results = Vec::new();
        for algorithm in Algorithm::ALL {
            let mut simulation = base.clone();
            let mut renderer = TerminalRenderer::new(algorithm, &quiet);
            results.push(simulation.run_with_statistics(algorithm, &mut renderer)?);
        }
        Ok(results)
    }

    pub fn print_comparison_results(results: &[SearchStatistics]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();
        println!(
            "{:<10} {:<12} {:<10} {:<10} {:<10} {:<12} {:<12}",
            "Algorithm", "Outcome", "Expanded", "Path", "Optimal", "Efficiency", "Elapsed"
        );
        println!("{}", "-".repeat(80));

        for result in results {
            let optimal = result
                .optimal_path_length
                .map_or_else(|| "-".to_string(), |len| len.to_string());
            println!(
                "{:<10} {:<12} {:<10} {:<10} {:<10} {:<12} {:<12}",
                result.algorithm.to_string(),
                result.outcome.to_string(),
                result.expanded,
                result.path_length,
                optimal,
                format!("{:.3}", result.route_efficiency),
                format!("{:.2?}", result.elapsed)
            );
        }

        if let Some(fewest) = results
            .iter()
            .filter(|r| r.outcome == Outcome::Found)
            .min_by_key(|r| r.expanded)
        {
            println!();
            println!(
                "Fewest expansions: {} ({} nodes)",
                fewest.algorithm, fewest.expanded
            );
        }
    }
}

/// Observer that draws the grid to the terminal after every step and
/// sleeps for the configured delay. Also enforces an optional step budget
/// by raising a cancel flag the search polls.
pub struct TerminalRenderer {
    algorithm: Algorithm,
    delay: Duration,
    visualize: bool,
    steps: usize,
    traced: usize,
    max_steps: Option<usize>,
    cancelled: Rc<Cell<bool>>,
}

impl TerminalRenderer {
    pub fn new(algorithm: Algorithm, config: &Config) -> Self {
        TerminalRenderer {
            algorithm,
            delay: Duration::from_millis(config.delay_ms),
            visualize: !config.no_visualization,
            steps: 0,
            traced: 0,
            max_steps: config.max_steps,
            // A zero budget stops the search before its first expansion.
            cancelled: Rc::new(Cell::new(config.max_steps == Some(0))),
        }
    }

    /// Expanded nodes seen so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn cancel_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.cancelled)
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}

impl StepObserver for TerminalRenderer {
    fn on_step(&mut self, grid: &Grid, step: Step) {
        match step {
            Step::Expanded(_) => self.steps += 1,
            Step::Traced(_) => self.traced += 1,
        }

        if let Some(max_steps) = self.max_steps {
            if self.steps >= max_steps {
                self.cancelled.set(true);
            }
        }

        if self.visualize {
            self.clear_screen();
            println!("=== PATHFINDING VISUALIZER ===");
            println!(
                "Algorithm: {} | Grid: {}x{} ({}px) | Step: {} | Path cells traced: {}",
                self.algorithm,
                grid.rows(),
                grid.rows(),
                grid.width(),
                self.steps,
                self.traced
            );
            grid.print_grid();
            thread::sleep(self.delay);
        }
    }
}
