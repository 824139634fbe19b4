//! Generational loop.

use hn_core::Real;
use hn_graph::{NetworkGraph, NodeRecord, PipeRecord};
use hn_hydraulics::format_inch;
use hn_solver::{HydraulicProblem, SolveControl, SolverError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::error::OptimizeResult;
use crate::evaluate::{Evaluation, Evaluator, evaluate_design};
use crate::genetic::{Genome, crossover, mutate, random_genome, tournament};
use crate::report::{
    Action, GenerationStats, OptimizationReport, PipeDesign, Recommendation, improvement_percent,
};

#[derive(Debug, Clone)]
struct Individual {
    genome: Genome,
    evaluation: Evaluation,
}

/// Evaluate genomes in order; in parallel when asked, with results in input order.
fn evaluate_all(
    evaluator: &Evaluator<'_, '_>,
    genomes: Vec<Genome>,
    parallel: bool,
) -> OptimizeResult<Vec<Individual>> {
    let evaluations: Vec<OptimizeResult<Evaluation>> = if parallel {
        genomes.par_iter().map(|g| evaluator.evaluate(g)).collect()
    } else {
        genomes.iter().map(|g| evaluator.evaluate(g)).collect()
    };
    genomes
        .into_iter()
        .zip(evaluations)
        .map(|(genome, evaluation)| {
            Ok(Individual {
                genome,
                evaluation: evaluation?,
            })
        })
        .collect()
}

fn rank(population: &mut [Individual]) {
    population.sort_by(|a, b| a.evaluation.fitness.total_cmp(&b.evaluation.fitness));
}

fn stats(generation: usize, population: &[Individual]) -> GenerationStats {
    let fitness = population.iter().map(|i| i.evaluation.fitness);
    GenerationStats {
        generation,
        best_fitness: population[0].evaluation.fitness,
        worst_fitness: population[population.len() - 1].evaluation.fitness,
        mean_fitness: fitness.sum::<Real>() / population.len() as Real,
        feasible: population.iter().filter(|i| i.evaluation.feasible).count(),
    }
}

pub fn optimize(
    problem: &HydraulicProblem<'_>,
    config: &OptimizerConfig,
) -> OptimizeResult<OptimizationReport> {
    optimize_with_control(problem, config, &SolveControl::unbounded())
}

/// Run the genetic search. `control` is checked before every generation; when it
/// fires, the best individual of the last fully evaluated generation is reported.
pub fn optimize_with_control(
    problem: &HydraulicProblem<'_>,
    config: &OptimizerConfig,
    control: &SolveControl,
) -> OptimizeResult<OptimizationReport> {
    config.validate()?;
    let graph = problem.graph();
    let genes = graph.pipe_count();
    let alleles = config.catalog.len();
    let size = config.population_size;
    let evaluator = Evaluator::new(problem, config);
    let mut rng = StdRng::seed_from_u64(config.seed);

    info!(
        pipes = genes,
        catalog = alleles,
        population = size,
        generations = config.generations,
        seed = config.seed,
        "starting diameter optimization"
    );

    let baseline = evaluate_design(problem, problem.diameters_mm(), config)?;

    let initial: Vec<Genome> = (0..size)
        .map(|_| random_genome(&mut rng, genes, alleles))
        .collect();
    let mut population = evaluate_all(&evaluator, initial, config.parallel)?;
    rank(&mut population);
    let mut history = vec![stats(0, &population)];
    let mut generations_run = 0;
    let mut cancelled = false;

    for generation in 1..=config.generations {
        if let Some(reason) = control.check() {
            warn!(?reason, generation, "optimization stopped early");
            cancelled = true;
            break;
        }

        let fitness: Vec<Real> = population.iter().map(|i| i.evaluation.fitness).collect();
        let wanted = size - config.elitism;
        let mut children: Vec<Genome> = Vec::with_capacity(wanted);
        while children.len() < wanted {
            let a = &population[tournament(&mut rng, &fitness, config.tournament_size)].genome;
            let b = &population[tournament(&mut rng, &fitness, config.tournament_size)].genome;
            let (mut x, mut y) = if rng.gen_bool(config.crossover_rate) {
                crossover(&mut rng, a, b, config.crossover)
            } else {
                (a.clone(), b.clone())
            };
            mutate(&mut rng, &mut x, config.mutation_rate, alleles);
            mutate(&mut rng, &mut y, config.mutation_rate, alleles);
            children.push(x);
            if children.len() < wanted {
                children.push(y);
            }
        }

        let mut next = population[..config.elitism].to_vec();
        next.extend(evaluate_all(&evaluator, children, config.parallel)?);
        rank(&mut next);
        population = next;
        generations_run = generation;

        let s = stats(generation, &population);
        debug!(
            generation,
            best = s.best_fitness,
            mean = s.mean_fitness,
            feasible = s.feasible,
            "generation done"
        );
        history.push(s);
    }

    let best = &population[0];
    let report = build_report(
        problem,
        config,
        best,
        history,
        baseline,
        generations_run,
        cancelled,
    );
    info!(
        cost = report.cost,
        fitness = report.fitness,
        feasible = report.feasible,
        improvement = report.improvement_percent,
        "optimization finished"
    );
    Ok(report)
}

/// Build the network from plain records and optimize it.
pub fn optimize_records(
    nodes: &[NodeRecord],
    pipes: &[PipeRecord],
    config: &OptimizerConfig,
) -> OptimizeResult<OptimizationReport> {
    config.validate()?;
    let graph = NetworkGraph::from_records(nodes, pipes).map_err(SolverError::from)?;
    let problem = HydraulicProblem::new(&graph)?;
    optimize(&problem, config)
}

fn build_report(
    problem: &HydraulicProblem<'_>,
    config: &OptimizerConfig,
    best: &Individual,
    history: Vec<GenerationStats>,
    baseline: Evaluation,
    generations_run: usize,
    cancelled: bool,
) -> OptimizationReport {
    let entries = config.catalog.entries();
    let pipes = problem.graph().pipes();

    let diameters: Vec<PipeDesign> = pipes
        .iter()
        .zip(&best.genome)
        .map(|(p, &g)| {
            let e = &entries[g];
            PipeDesign {
                pipe_id: p.key.clone(),
                length: p.length,
                diameter_mm: e.internal_mm,
                nominal_inch: e.nominal_inch,
                label: format_inch(e.nominal_inch),
                cost: config.cost.pipe_cost(p.length, e),
            }
        })
        .collect();

    let recommendations = diameters
        .iter()
        .zip(problem.diameters_mm())
        .filter(|(d, current)| (d.diameter_mm - **current).abs() > 1.0)
        .map(|(d, &current)| Recommendation {
            pipe_id: d.pipe_id.clone(),
            current_mm: current,
            proposed_mm: d.diameter_mm,
            action: if d.diameter_mm > current {
                Action::Increase
            } else {
                Action::Decrease
            },
        })
        .collect();

    let e = &best.evaluation;
    OptimizationReport {
        diameters,
        cost: e.cost,
        fitness: e.fitness,
        penalty: e.penalty,
        min_pressure: e.min_pressure,
        max_pressure: e.max_pressure,
        max_velocity: e.max_velocity,
        feasible: e.feasible,
        converged: e.converged,
        generations_run,
        cancelled,
        history,
        improvement_percent: improvement_percent(baseline.fitness, e.fitness),
        baseline,
        recommendations,
    }
}
