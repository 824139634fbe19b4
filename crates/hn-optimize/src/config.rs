//! Optimizer settings.

use hn_core::Real;
use hn_hydraulics::DiameterCatalog;
use hn_solver::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::cost::CostFunction;
use crate::error::{OptimizeError, OptimizeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    #[default]
    SinglePoint,
    Uniform,
}

/// How hard constraint violations are punished relative to cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Per metre of pressure outside the window, summed over nodes.
    pub pressure: Real,
    /// Per m/s of velocity above the ceiling, summed over pipes.
    pub velocity: Real,
    /// Flat penalty for a design whose solve did not converge.
    pub non_convergence: Real,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            pressure: 10_000.0,
            velocity: 10_000.0,
            non_convergence: 1e9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Per-gene probability of being reassigned a random catalog index.
    pub mutation_rate: Real,
    /// Probability that a pair of parents is recombined rather than copied.
    pub crossover_rate: Real,
    pub crossover: CrossoverKind,
    /// Best individuals copied unchanged into the next generation. At least one,
    /// so the best design found is never lost.
    pub elitism: usize,
    pub tournament_size: usize,
    pub seed: u64,
    /// Evaluate each generation on the rayon pool.
    pub parallel: bool,
    pub catalog: DiameterCatalog,
    pub cost: CostFunction,
    pub penalty: PenaltyWeights,
    /// Pressure window (m) every consumption node should meet.
    pub min_pressure: Real,
    pub max_pressure: Real,
    /// Velocity ceiling (m/s).
    pub max_velocity: Real,
    pub solver: SolverConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.05,
            crossover_rate: 0.8,
            crossover: CrossoverKind::default(),
            elitism: 2,
            tournament_size: 3,
            seed: 42,
            parallel: true,
            catalog: DiameterCatalog::default(),
            cost: CostFunction::default(),
            penalty: PenaltyWeights::default(),
            min_pressure: 15.0,
            max_pressure: 50.0,
            max_velocity: 3.0,
            solver: SolverConfig {
                record_iterations: false,
                ..SolverConfig::default()
            },
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> OptimizeResult<()> {
        let bad = |what: String| Err(OptimizeError::Configuration { what });

        if self.population_size < 2 {
            return bad(format!(
                "population_size must be >= 2 (got {})",
                self.population_size
            ));
        }
        if self.elitism == 0 {
            return bad("elitism must be >= 1".to_string());
        }
        if self.elitism > self.population_size {
            return bad(format!(
                "elitism {} exceeds population_size {}",
                self.elitism, self.population_size
            ));
        }
        if self.tournament_size == 0 {
            return bad("tournament_size must be >= 1".to_string());
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return bad(format!("{name} must lie in [0, 1] (got {rate})"));
            }
        }
        if self.catalog.is_empty() {
            return bad("diameter catalog is empty".to_string());
        }
        if !(self.min_pressure.is_finite()
            && self.max_pressure.is_finite()
            && self.min_pressure <= self.max_pressure)
        {
            return bad(format!(
                "pressure window {}..{} m is not valid",
                self.min_pressure, self.max_pressure
            ));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return bad(format!("max_velocity must be > 0 (got {})", self.max_velocity));
        }
        let weights = [
            self.penalty.pressure,
            self.penalty.velocity,
            self.penalty.non_convergence,
        ];
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
            return bad("penalty weights must be finite and >= 0".to_string());
        }
        self.cost
            .validate()
            .map_err(|what| OptimizeError::Configuration { what })?;
        self.solver
            .validate()
            .map_err(OptimizeError::Solver)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = OptimizerConfig::default();
        assert_eq!(c.population_size, 50);
        assert_eq!(c.generations, 100);
        assert_eq!(c.elitism, 2);
        assert_eq!(c.seed, 42);
        assert!(!c.solver.record_iterations);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_settings() {
        let cases = [
            OptimizerConfig {
                population_size: 1,
                ..Default::default()
            },
            OptimizerConfig {
                elitism: 0,
                ..Default::default()
            },
            OptimizerConfig {
                elitism: 60,
                ..Default::default()
            },
            OptimizerConfig {
                mutation_rate: 1.5,
                ..Default::default()
            },
            OptimizerConfig {
                crossover_rate: -0.1,
                ..Default::default()
            },
            OptimizerConfig {
                tournament_size: 0,
                ..Default::default()
            },
            OptimizerConfig {
                min_pressure: 60.0,
                ..Default::default()
            },
        ];
        for c in cases {
            assert!(
                matches!(c.validate(), Err(OptimizeError::Configuration { .. })),
                "{c:?}"
            );
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: OptimizerConfig =
            serde_json::from_str(r#"{"generations": 5, "crossover": "uniform"}"#).unwrap();
        assert_eq!(c.generations, 5);
        assert_eq!(c.crossover, CrossoverKind::Uniform);
        assert_eq!(c.population_size, 50);
    }

    #[test]
    fn empty_catalog_does_not_deserialize() {
        let r: Result<OptimizerConfig, _> = serde_json::from_str(r#"{"catalog": []}"#);
        assert!(r.is_err());
    }
}
