//! Fitness of a candidate design.

use hn_core::Real;
use hn_hydraulics::CommercialPipe;
use hn_solver::{HydraulicProblem, NetworkSolution, SolverError, solve};
use serde::Serialize;

use crate::config::OptimizerConfig;
use crate::error::OptimizeResult;
use crate::genetic::Genome;

/// Score of one design. Lower fitness is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub cost: Real,
    pub penalty: Real,
    /// `cost + penalty`
    pub fitness: Real,
    /// Over consumption nodes; `None` when there are none or the solve failed.
    pub min_pressure: Option<Real>,
    pub max_pressure: Option<Real>,
    pub max_velocity: Real,
    pub converged: bool,
    /// Converged with every pressure and velocity inside the design window.
    pub feasible: bool,
}

/// Scores genomes against one network. Shared read-only across rayon workers.
pub struct Evaluator<'p, 'g> {
    problem: &'p HydraulicProblem<'g>,
    config: &'p OptimizerConfig,
}

impl<'p, 'g> Evaluator<'p, 'g> {
    pub fn new(problem: &'p HydraulicProblem<'g>, config: &'p OptimizerConfig) -> Self {
        Self { problem, config }
    }

    /// Internal diameters (mm) a genome stands for.
    pub fn diameters(&self, genome: &Genome) -> Vec<Real> {
        let entries = self.config.catalog.entries();
        genome.iter().map(|&g| entries[g].internal_mm).collect()
    }

    pub fn cost(&self, genome: &Genome) -> Real {
        let entries = self.config.catalog.entries();
        self.problem
            .graph()
            .pipes()
            .iter()
            .zip(genome)
            .map(|(p, &g)| self.config.cost.pipe_cost(p.length, &entries[g]))
            .sum()
    }

    pub fn evaluate(&self, genome: &Genome) -> OptimizeResult<Evaluation> {
        self.evaluate_diameters(&self.diameters(genome), self.cost(genome))
    }

    fn evaluate_diameters(&self, diameters_mm: &[Real], cost: Real) -> OptimizeResult<Evaluation> {
        let variant = self.problem.with_diameters(diameters_mm)?;
        match solve(&variant, &self.config.solver) {
            Ok(solution) => Ok(self.score(cost, &solution)),
            // A design that blows the iteration up is just a very bad design
            Err(SolverError::Numeric { .. }) => Ok(self.unsolvable(cost)),
            Err(e) => Err(e.into()),
        }
    }

    fn score(&self, cost: Real, solution: &NetworkSolution) -> Evaluation {
        let c = self.config;
        let mut min_pressure: Option<Real> = None;
        let mut max_pressure: Option<Real> = None;
        let mut pressure_violation = 0.0;

        for node in solution.nodes.iter().filter(|n| !n.is_source()) {
            let p = node.pressure;
            min_pressure = Some(min_pressure.map_or(p, |m| m.min(p)));
            max_pressure = Some(max_pressure.map_or(p, |m| m.max(p)));
            if p < c.min_pressure {
                pressure_violation += c.min_pressure - p;
            } else if p > c.max_pressure {
                pressure_violation += p - c.max_pressure;
            }
        }

        let mut max_velocity: Real = 0.0;
        let mut velocity_violation = 0.0;
        for pipe in &solution.pipes {
            max_velocity = max_velocity.max(pipe.velocity);
            velocity_violation += (pipe.velocity - c.max_velocity).max(0.0);
        }

        let mut penalty =
            c.penalty.pressure * pressure_violation + c.penalty.velocity * velocity_violation;
        if !solution.converged {
            penalty += c.penalty.non_convergence;
        }

        Evaluation {
            cost,
            penalty,
            fitness: cost + penalty,
            min_pressure,
            max_pressure,
            max_velocity,
            converged: solution.converged,
            feasible: solution.converged && pressure_violation == 0.0 && velocity_violation == 0.0,
        }
    }

    fn unsolvable(&self, cost: Real) -> Evaluation {
        let penalty = self.config.penalty.non_convergence;
        Evaluation {
            cost,
            penalty,
            fitness: cost + penalty,
            min_pressure: None,
            max_pressure: None,
            max_velocity: 0.0,
            converged: false,
            feasible: false,
        }
    }
}

/// Score an arbitrary design (e.g. the one currently drawn) with the optimizer's
/// own cost and penalty rules. Diameters off the catalog are priced at the
/// nearest catalog entry's unit cost.
pub fn evaluate_design(
    problem: &HydraulicProblem<'_>,
    diameters_mm: &[Real],
    config: &OptimizerConfig,
) -> OptimizeResult<Evaluation> {
    config.validate()?;
    let catalog = &config.catalog;
    let cost = problem
        .graph()
        .pipes()
        .iter()
        .zip(diameters_mm)
        .map(|(p, &d)| {
            let nearest = &catalog.entries()[catalog.nearest_index(d)];
            let priced = CommercialPipe {
                internal_mm: d,
                ..nearest.clone()
            };
            config.cost.pipe_cost(p.length, &priced)
        })
        .sum();
    Evaluator::new(problem, config).evaluate_diameters(diameters_mm, cost)
}
