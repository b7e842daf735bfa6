use clap::Parser;

use grid_pathfinding_visualizer::config::Config;
use grid_pathfinding_visualizer::logging;
use grid_pathfinding_visualizer::simulation::Simulation;

fn main() {
    let config = Config::parse();

    let _logger = match logging::init(&config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            std::process::exit(1);
        }
    };

    println!("Starting pathfinding visualizer...");
    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    println!("Barriers: {}", config.num_barriers);
    println!("Algorithm: {:?}", config.algorithm);

    if config.no_visualization {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!("Visualization enabled with {}ms delay", config.delay_ms);
    }
    println!();

    match config.algorithm.algorithm() {
        Some(algorithm) => match Simulation::run_single(&config, algorithm) {
            Ok(stats) => {
                println!("\n=== FINAL RESULTS ===");
                println!("{}", stats);
            }
            Err(e) => {
                eprintln!("Search failed: {}", e);
                std::process::exit(1);
            }
        },
        None => match Simulation::run_all_algorithms(&config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        },
    }
}
