//! The checks themselves.

use hn_core::Real;
use hn_solver::{NetworkSolution, NodeState, PipeState};
use tracing::debug;

use crate::alert::{ElementType, Rule, ValidationAlert};
use crate::limits::{Ambit, NormativeLimits};
use crate::report::ValidationReport;

struct Collector<'l> {
    limits: &'l NormativeLimits,
    alerts: Vec<ValidationAlert>,
    checks: usize,
}

impl Collector<'_> {
    fn check(&mut self) {
        self.checks += 1;
    }

    #[allow(clippy::too_many_arguments)]
    fn raise(
        &mut self,
        rule: Rule,
        element_type: ElementType,
        element_id: &str,
        value: Real,
        threshold: Real,
        unit: &'static str,
        message: String,
    ) {
        self.alerts.push(ValidationAlert {
            severity: rule.severity(),
            rule,
            element_id: element_id.to_string(),
            element_type,
            value,
            threshold,
            unit,
            message,
            suggestion: rule.suggestion(),
            reference: self.limits.reference.clone(),
        });
    }

    fn node(&mut self, node: &NodeState) {
        if node.is_source() {
            return;
        }
        let l = self.limits;
        let p = node.pressure;
        self.check();
        if p < 0.0 {
            self.raise(
                Rule::NegativePressure,
                ElementType::Node,
                &node.id,
                p,
                0.0,
                "m",
                format!("node {}: negative pressure ({p:.2} m)", node.id),
            );
        } else if p < l.min_pressure {
            self.raise(
                Rule::LowPressure,
                ElementType::Node,
                &node.id,
                p,
                l.min_pressure,
                "m",
                format!(
                    "node {}: pressure {p:.2} m below the minimum of {} m",
                    node.id, l.min_pressure
                ),
            );
        } else if p > l.max_pressure {
            self.raise(
                Rule::HighPressure,
                ElementType::Node,
                &node.id,
                p,
                l.max_pressure,
                "m",
                format!(
                    "node {}: pressure {p:.2} m above the static maximum of {} m",
                    node.id, l.max_pressure
                ),
            );
        }
    }

    fn pipe(&mut self, pipe: &PipeState) {
        // Stagnant stubs would only produce spurious "too slow" alerts
        if pipe.stagnant {
            return;
        }
        let l = self.limits;
        let v = pipe.velocity;

        self.check();
        if v > l.max_velocity {
            self.raise(
                Rule::HighVelocity,
                ElementType::Pipe,
                &pipe.id,
                v,
                l.max_velocity,
                "m/s",
                format!(
                    "pipe {}: velocity {v:.2} m/s above the maximum of {} m/s",
                    pipe.id, l.max_velocity
                ),
            );
        } else if v > 0.0 && v < l.min_velocity {
            self.raise(
                Rule::LowVelocity,
                ElementType::Pipe,
                &pipe.id,
                v,
                l.min_velocity,
                "m/s",
                format!(
                    "pipe {}: velocity {v:.2} m/s below the minimum of {} m/s",
                    pipe.id, l.min_velocity
                ),
            );
        }

        self.check();
        if pipe.diameter_mm < l.min_diameter_mm {
            self.raise(
                Rule::SmallDiameter,
                ElementType::Pipe,
                &pipe.id,
                pipe.diameter_mm,
                l.min_diameter_mm,
                "mm",
                format!(
                    "pipe {}: diameter {} mm below the minimum of {} mm",
                    pipe.id, pipe.diameter_mm, l.min_diameter_mm
                ),
            );
        }
    }
}

fn run<'l>(nodes: &[NodeState], pipes: &[PipeState], limits: &'l NormativeLimits) -> Collector<'l> {
    let mut c = Collector {
        limits,
        alerts: Vec::new(),
        checks: 0,
    };
    nodes.iter().for_each(|n| c.node(n));
    pipes.iter().for_each(|p| c.pipe(p));
    c
}

/// Check solved node and pipe states against `limits`.
pub fn validate(
    nodes: &[NodeState],
    pipes: &[PipeState],
    limits: &NormativeLimits,
) -> ValidationReport {
    let c = run(nodes, pipes, limits);
    let report = ValidationReport::new(c.alerts, c.checks, true);
    debug!(
        errors = report.errors,
        warnings = report.warnings,
        checks = report.checks,
        "validated"
    );
    report
}

/// [`validate`] with the default limits of `ambit`.
pub fn validate_for_ambit(nodes: &[NodeState], pipes: &[PipeState], ambit: Ambit) -> ValidationReport {
    validate(nodes, pipes, &NormativeLimits::for_ambit(ambit))
}

/// Validate a whole solution, flagging the report as unreliable when the
/// solve did not converge.
pub fn validate_solution(solution: &NetworkSolution, limits: &NormativeLimits) -> ValidationReport {
    let mut c = run(&solution.nodes, &solution.pipes, limits);
    c.check();
    if !solution.converged {
        c.raise(
            Rule::NotConverged,
            ElementType::Network,
            "",
            solution.error_final,
            0.0,
            "m³/s",
            format!(
                "solution did not converge after {} iterations ({:?}); values are the last iterate",
                solution.iterations_run, solution.termination
            ),
        );
    }
    let report = ValidationReport::new(c.alerts, c.checks, solution.converged);
    debug!(
        errors = report.errors,
        warnings = report.warnings,
        reliable = report.reliable,
        "validated solution"
    );
    report
}
