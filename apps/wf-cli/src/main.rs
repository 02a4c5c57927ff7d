use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use wf_core::Timer;
use wf_graph::Label;
use wf_maze::{Explorer, MazeError};

mod error;
mod files;

use error::CliResult;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "Wayfind CLI - Shortest routes over weighted networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network file's matrix shape, weights, and labels
    Validate {
        /// Path to the network YAML/JSON file
        network_path: PathBuf,
    },
    /// Shortest route between two vertex labels
    Route {
        /// Path to the network YAML/JSON file
        network_path: PathBuf,
        /// Source vertex label
        #[arg(long)]
        from: Label,
        /// Destination vertex label
        #[arg(long)]
        to: Label,
        /// On a cache miss, root the computed run at the source
        #[arg(long)]
        prefer_source: bool,
        /// Emit the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// Maze tools
    #[command(subcommand)]
    Maze(MazeCommands),
}

#[derive(Subcommand)]
enum MazeCommands {
    /// Shortest route from start to exit through a fully-known maze
    Route {
        /// Path to the maze YAML file
        maze_path: PathBuf,
    },
    /// Explore a maze frontier-first under fog of war
    Explore {
        /// Path to the maze YAML file
        maze_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Route {
            network_path,
            from,
            to,
            prefer_source,
            json,
        } => cmd_route(&network_path, from, to, prefer_source, json),
        Commands::Maze(maze_cmd) => match maze_cmd {
            MazeCommands::Route { maze_path } => cmd_maze_route(&maze_path),
            MazeCommands::Explore { maze_path } => cmd_maze_explore(&maze_path),
        },
    }
}

fn cmd_validate(network_path: &Path) -> CliResult<()> {
    println!("Validating network: {}", network_path.display());
    let file = files::load_network(network_path)?;
    let graph = file.to_graph()?;

    println!("✓ Network is valid");
    if let Some(name) = &file.name {
        println!("  Name: {}", name);
    }
    println!("  Vertices: {}", graph.order());
    println!("  Shape: {:?}", graph.shape());
    println!("  Directed edges: {}", graph.edge_count());
    Ok(())
}

fn cmd_route(
    network_path: &Path,
    from: Label,
    to: Label,
    prefer_source: bool,
    json: bool,
) -> CliResult<()> {
    let file = files::load_network(network_path)?;

    let build_timer = Timer::start("graph build");
    let graph = file.to_graph()?;
    build_timer.stop_and_print();

    let query_timer = Timer::start("route query");
    let route = graph.shortest_route_with(from, to, prefer_source)?;
    query_timer.stop_and_print();

    if json {
        let payload = serde_json::json!({
            "from": from,
            "to": to,
            "distance": route.distance,
            "vertices": route.vertices,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let steps: Vec<String> = route.vertices.iter().map(|v| v.to_string()).collect();
        println!("Route {} -> {}:", from, to);
        println!("  Distance: {}", route.distance);
        println!("  Vertices: {}", steps.join(" -> "));
    }
    Ok(())
}

fn cmd_maze_route(maze_path: &Path) -> CliResult<()> {
    let map = wf_maze::load_yaml(maze_path)?;
    let exit = map.exit().ok_or(MazeError::NoExit)?;

    let graph = map.to_graph()?;
    let route = graph.shortest_route(map.start(), exit)?;

    print!("{}", map.render());
    println!("✓ Route found: {} steps", route.distance);
    let path: Vec<String> = route
        .vertices
        .iter()
        .map(|&v| {
            let (row, col) = map.coords(v);
            format!("({},{})", row, col)
        })
        .collect();
    println!("  {}", path.join(" -> "));
    Ok(())
}

fn cmd_maze_explore(maze_path: &Path) -> CliResult<()> {
    let truth = wf_maze::load_yaml(maze_path)?;
    let timer = Timer::start("exploration");

    let mut known = truth.unexplored();
    known.reveal(&truth, known.start());

    let mut explorer = Explorer::new(known.clone())?;
    let mut current = known.start();
    let mut visits = vec![known.coords(current)];
    let mut cells_walked = 0usize;
    let mut total_runs = 0usize;

    while let Some(route) = explorer.next_route(current)? {
        total_runs += explorer.graph().runs_computed()?;
        for &label in &route.vertices {
            known.reveal(&truth, label);
        }
        cells_walked += route.vertices.len().saturating_sub(1);
        if let Some(&last) = route.vertices.last() {
            current = last;
        }
        visits.push(known.coords(current));
        tracing::debug!(
            leg = visits.len() - 1,
            at = current,
            unknown = known.unknown_count(),
            "exploration leg walked"
        );
        explorer.update(known.clone())?;
    }
    // The final call found no route but may still have computed runs.
    total_runs += explorer.graph().runs_computed()?;
    timer.stop_and_print();

    let stops: Vec<String> = visits
        .iter()
        .map(|(row, col)| format!("({},{})", row, col))
        .collect();

    print!("{}", known.render());
    println!("✓ Exploration complete");
    println!("  Legs: {}", visits.len() - 1);
    println!("  Visits: {}", stops.join(" -> "));
    println!("  Cells walked: {}", cells_walked);
    println!("  Dijkstra runs: {}", total_runs);
    println!("  Cells still unknown: {}", known.unknown_count());
    match known.exit() {
        Some(exit) => {
            let (row, col) = known.coords(exit);
            println!("  Exit found at ({},{})", row, col);
        }
        None => println!("  Exit not found"),
    }
    Ok(())
}
