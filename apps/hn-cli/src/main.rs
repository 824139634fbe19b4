//! hn-cli: command-line interface for hydronet.

mod error;
mod output;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use error::CliResult;
use hn_project::Project;
use hn_solver::{HydraulicProblem, SolveControl, solve_with_control};
use hn_validate::{Ambit, validate_solution};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hn")]
#[command(about = "Hydronet - water distribution network analysis", long_about = None)]
struct Cli {
    /// Log solver progress at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a project and report its topology
    Check {
        /// Path to the project file (.yaml or .json)
        project: PathBuf,
    },
    /// Balance flows and compute heads
    Solve {
        project: PathBuf,
        /// Convergence tolerance on the loop correction, m³/s
        #[arg(long)]
        tolerance: Option<f64>,
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Print the per-iteration log
        #[arg(long)]
        iterations: bool,
        #[arg(long)]
        json: bool,
    },
    /// Solve, then check the result against normative limits
    Validate {
        project: PathBuf,
        /// Override the project's ambit (urban or rural)
        #[arg(long)]
        ambit: Option<Ambit>,
        #[arg(long)]
        json: bool,
    },
    /// Search the catalog for a cheaper set of diameters
    Optimize {
        project: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        generations: Option<usize>,
        #[arg(long)]
        population: Option<usize>,
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { project } => cmd_check(&project),
        Commands::Solve {
            project,
            tolerance,
            max_iterations,
            timeout_ms,
            iterations,
            json,
        } => cmd_solve(&project, tolerance, max_iterations, timeout_ms, iterations, json),
        Commands::Validate {
            project,
            ambit,
            json,
        } => cmd_validate(&project, ambit, json),
        Commands::Optimize {
            project,
            seed,
            generations,
            population,
            timeout_ms,
            json,
        } => cmd_optimize(&project, seed, generations, population, timeout_ms, json),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn control(timeout_ms: Option<u64>) -> SolveControl {
    match timeout_ms {
        Some(ms) => SolveControl::unbounded().with_timeout(Duration::from_millis(ms)),
        None => SolveControl::unbounded(),
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load(path: &Path) -> CliResult<Project> {
    let project = hn_project::load(path)?;
    debug!(
        path = %path.display(),
        nodes = project.nodes.len(),
        pipes = project.pipes.len(),
        "project loaded"
    );
    Ok(project)
}

fn cmd_check(path: &Path) -> CliResult<()> {
    let project = load(path)?;
    let graph = project.build_graph()?;
    let problem = HydraulicProblem::new(&graph)?;
    let topology = problem.topology();

    println!("✓ {} is valid", path.display());
    if !project.name.is_empty() {
        println!("  Name: {}", project.name);
    }
    println!("  Ambit: {}", project.ambit.as_str());
    println!("  Nodes: {}", graph.node_count());
    println!("  Pipes: {}", graph.pipe_count());
    println!("  Sources: {}", graph.source_nodes().len());
    println!("  Loops: {}", topology.loops().len());
    println!("  Balancing loops: {}", topology.balancing().len());
    println!("  Kind: {}", problem.kind().as_str());
    Ok(())
}

fn cmd_solve(
    path: &Path,
    tolerance: Option<f64>,
    max_iterations: Option<usize>,
    timeout_ms: Option<u64>,
    iterations: bool,
    json: bool,
) -> CliResult<()> {
    let project = load(path)?;
    let graph = project.build_graph()?;
    let problem = HydraulicProblem::new(&graph)?;

    let mut config = project.solver_config();
    if let Some(tolerance) = tolerance {
        config.tolerance = tolerance;
    }
    if let Some(max_iterations) = max_iterations {
        config.max_iterations = max_iterations;
    }
    config.record_iterations = iterations || config.record_iterations;

    let solution = solve_with_control(&problem, &config, &control(timeout_ms))?;
    if json {
        print_json(&solution)
    } else {
        output::print_solution(&solution, iterations);
        Ok(())
    }
}

fn cmd_validate(path: &Path, ambit: Option<Ambit>, json: bool) -> CliResult<()> {
    let mut project = load(path)?;
    if let Some(ambit) = ambit {
        project.ambit = ambit;
        project.limits = None;
    }
    let limits = project.effective_limits();
    limits.validate()?;

    let graph = project.build_graph()?;
    let problem = HydraulicProblem::new(&graph)?;
    let solution = solve_with_control(&problem, &project.solver_config(), &control(None))?;
    let report = validate_solution(&solution, &limits);

    if json {
        print_json(&report)
    } else {
        println!("Limits: {} ({})", limits.reference, project.ambit.as_str());
        output::print_validation(&report);
        Ok(())
    }
}

fn cmd_optimize(
    path: &Path,
    seed: Option<u64>,
    generations: Option<usize>,
    population: Option<usize>,
    timeout_ms: Option<u64>,
    json: bool,
) -> CliResult<()> {
    let project = load(path)?;
    let graph = project.build_graph()?;
    let problem = HydraulicProblem::new(&graph)?;

    let mut config = project.optimizer_config();
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(generations) = generations {
        config.generations = generations;
    }
    if let Some(population) = population {
        config.population_size = population;
    }

    let report = hn_optimize::optimize_with_control(&problem, &config, &control(timeout_ms))?;
    if json {
        print_json(&report)
    } else {
        output::print_optimization(&report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_flags_parse() {
        let cli = Cli::try_parse_from([
            "hn",
            "solve",
            "net.yaml",
            "--tolerance",
            "1e-6",
            "--max-iterations",
            "50",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve {
                project,
                tolerance,
                max_iterations,
                json,
                iterations,
                timeout_ms,
            } => {
                assert_eq!(project, PathBuf::from("net.yaml"));
                assert_eq!(tolerance, Some(1e-6));
                assert_eq!(max_iterations, Some(50));
                assert!(json);
                assert!(!iterations);
                assert_eq!(timeout_ms, None);
            }
            _ => panic!("expected solve"),
        }
    }

    #[test]
    fn ambit_accepts_spanish_alias() {
        let cli = Cli::try_parse_from(["hn", "validate", "net.yaml", "--ambit", "urbano"]).unwrap();
        match cli.command {
            Commands::Validate { ambit, .. } => assert_eq!(ambit, Some(Ambit::Urban)),
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["hn", "check", "net.yaml", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn missing_project_file_is_an_error() {
        let err = load(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(
            err,
            error::CliError::Project(hn_project::ProjectError::Io(_))
        ));
    }

    #[test]
    fn loads_a_demo_project() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/town_loop.yaml");
        let project = load(&path).unwrap();
        assert!(!project.nodes.is_empty());
        assert!(!project.pipes.is_empty());
    }
}
