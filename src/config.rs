use crate::algorithms::Algorithm;
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    AStar,
    Dfs,
    Bfs,
    All,
}

impl AlgorithmChoice {
    /// The single algorithm to run, or `None` for `all`.
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            AlgorithmChoice::AStar => Some(Algorithm::HeuristicBestFirst),
            AlgorithmChoice::Dfs => Some(Algorithm::DepthFirst),
            AlgorithmChoice::Bfs => Some(Algorithm::BreadthFirst),
            AlgorithmChoice::All => None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    /// Pixel width of the whole grid
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 80)]
    pub num_barriers: usize,

    #[arg(long, value_enum, default_value_t = AlgorithmChoice::AStar)]
    pub algorithm: AlgorithmChoice,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Seed for reproducible environments
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cancel the search after this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 20,
            width: 800,
            num_barriers: 80,
            algorithm: AlgorithmChoice::AStar,
            delay_ms: 50,
            no_visualization: false,
            seed: None,
            max_steps: None,
            log_level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let config = Config::parse_from(["grid_pathfinding_visualizer"]);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.algorithm, AlgorithmChoice::AStar);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn parses_kebab_case_algorithms() {
        let config = Config::parse_from([
            "grid_pathfinding_visualizer",
            "--algorithm",
            "a-star",
            "--max-steps",
            "10",
        ]);
        assert_eq!(
            config.algorithm.algorithm(),
            Some(Algorithm::HeuristicBestFirst)
        );
        assert_eq!(config.max_steps, Some(10));

        let config =
            Config::parse_from(["grid_pathfinding_visualizer", "--algorithm", "all"]);
        assert_eq!(config.algorithm.algorithm(), None);
    }
}
