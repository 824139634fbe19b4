//! Plain-text rendering of results.

use hn_core::m3ps_to_lps;
use hn_optimize::OptimizationReport;
use hn_solver::NetworkSolution;
use hn_validate::ValidationReport;

pub fn print_solution(solution: &NetworkSolution, show_iterations: bool) {
    let summary = solution.summary();
    let status = if solution.converged { "✓ converged" } else { "✗ NOT converged" };
    println!(
        "{status} ({:?}) in {} iterations, final max |ΔQ| = {:.3e} m³/s",
        solution.termination, solution.iterations_run, solution.error_final
    );
    println!(
        "  {} network: {} nodes, {} pipes, {} loops",
        summary.kind.as_str(),
        summary.node_count,
        summary.pipe_count,
        summary.loop_count
    );
    println!("  Total demand: {:.2} l/s", m3ps_to_lps(summary.total_demand));

    println!();
    println!(
        "  {:<12} {:>10} {:>10} {:>10} {:>10}",
        "node", "elev m", "demand l/s", "head m", "press m"
    );
    for n in &solution.nodes {
        println!(
            "  {:<12} {:>10.2} {:>10.3} {:>10.2} {:>10.2}",
            n.id,
            n.elevation,
            m3ps_to_lps(n.demand),
            n.head,
            n.pressure
        );
    }

    println!();
    println!(
        "  {:<12} {:>8} {:>10} {:>10} {:>10}",
        "pipe", "D mm", "Q l/s", "V m/s", "hf m"
    );
    for p in &solution.pipes {
        println!(
            "  {:<12} {:>8.1} {:>10.3} {:>10.3} {:>10.3}",
            p.id,
            p.diameter_mm,
            m3ps_to_lps(p.flow),
            p.velocity,
            p.head_loss
        );
    }

    if show_iterations {
        println!();
        for record in &solution.iteration_log {
            println!(
                "  iter {:>4}: max |ΔQ| {:.3e}, Σ|ΔQ| {:.3e}, max imbalance {:.3e} m",
                record.iteration, record.max_error, record.total_correction, record.max_imbalance
            );
        }
    }
}

pub fn print_validation(report: &ValidationReport) {
    let status = if report.valid { "✓ meets limits" } else { "✗ violates limits" };
    println!(
        "{status}: {} errors, {} warnings ({} of {} checks passed)",
        report.errors, report.warnings, report.passed, report.checks
    );
    if !report.reliable {
        println!("  ! solution did not converge; values below are not a trustworthy design");
    }
    for alert in &report.alerts {
        println!("  {alert}");
        println!("      → {}", alert.suggestion);
    }
}

pub fn print_optimization(report: &OptimizationReport) {
    let status = if report.feasible { "✓ feasible" } else { "✗ infeasible" };
    println!(
        "{status} design after {} generations{}",
        report.generations_run,
        if report.cancelled { " (stopped early)" } else { "" }
    );
    println!(
        "  cost {:.2}, penalty {:.2}, fitness {:.2} ({:.1}% better than current)",
        report.cost, report.penalty, report.fitness, report.improvement_percent
    );
    if let (Some(min), Some(max)) = (report.min_pressure, report.max_pressure) {
        println!("  pressure {min:.2}..{max:.2} m, max velocity {:.2} m/s", report.max_velocity);
    }

    println!();
    println!(
        "  {:<12} {:>8} {:>8} {:>10}",
        "pipe", "size", "D mm", "cost"
    );
    for d in &report.diameters {
        println!(
            "  {:<12} {:>8} {:>8.1} {:>10.2}",
            d.pipe_id, d.label, d.diameter_mm, d.cost
        );
    }

    if !report.recommendations.is_empty() {
        println!();
        for r in &report.recommendations {
            println!(
                "  {:?} {} from {:.1} mm to {:.1} mm",
                r.action, r.pipe_id, r.current_mm, r.proposed_mm
            );
        }
    }
}
