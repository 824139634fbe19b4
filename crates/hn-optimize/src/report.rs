//! Optimizer output.

use hn_core::Real;
use serde::Serialize;

use crate::evaluate::Evaluation;

/// Chosen size for one pipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeDesign {
    pub pipe_id: String,
    pub length: Real,
    pub diameter_mm: Real,
    pub nominal_inch: Real,
    /// Nominal size as printed on pipe, e.g. `2 1/2"`.
    pub label: String,
    pub cost: Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Increase,
    Decrease,
}

/// A pipe whose proposed size differs from the current one by more than 1 mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub pipe_id: String,
    pub current_mm: Real,
    pub proposed_mm: Real,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    /// 0 is the initial population.
    pub generation: usize,
    pub best_fitness: Real,
    pub mean_fitness: Real,
    pub worst_fitness: Real,
    pub feasible: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub diameters: Vec<PipeDesign>,
    pub cost: Real,
    pub fitness: Real,
    pub penalty: Real,
    pub min_pressure: Option<Real>,
    pub max_pressure: Option<Real>,
    pub max_velocity: Real,
    pub feasible: bool,
    pub converged: bool,
    pub generations_run: usize,
    /// Stopped by the cancel flag or the deadline before the last generation.
    pub cancelled: bool,
    /// One entry per evaluated generation, initial population included.
    pub history: Vec<GenerationStats>,
    /// The caller's current design, scored the same way.
    pub baseline: Evaluation,
    /// Fitness gain over the baseline, in percent (never negative).
    pub improvement_percent: Real,
    pub recommendations: Vec<Recommendation>,
}

impl OptimizationReport {
    pub fn best_fitness_history(&self) -> Vec<Real> {
        self.history.iter().map(|g| g.best_fitness).collect()
    }
}

pub(crate) fn improvement_percent(baseline: Real, best: Real) -> Real {
    if baseline > 0.0 && baseline.is_finite() {
        ((baseline - best) / baseline * 100.0).max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_is_clamped() {
        assert_eq!(improvement_percent(200.0, 150.0), 25.0);
        assert_eq!(improvement_percent(100.0, 150.0), 0.0);
        assert_eq!(improvement_percent(0.0, 10.0), 0.0);
    }
}
