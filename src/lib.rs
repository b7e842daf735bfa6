//! Grid search engine for an interactive pathfinding visualizer.
//!
//! A [`grid::Grid`] holds cells in one of a few logical states. The
//! [`algorithms::SearchEngine`] explores it with A*, depth-first or
//! breadth-first search, calling a [`algorithms::common::StepObserver`] after
//! every step so a renderer can draw the search as it happens.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod simulation;
pub mod statistics;

pub use algorithms::common::{NoopObserver, Step, StepObserver};
pub use algorithms::{Algorithm, SearchEngine};
pub use error::{SearchError, SearchResult};
pub use grid::{Cell, CellState, Grid, Position};
