//! Branched networks: flows follow from demands with no iteration.

use hn_graph::{NodeKind, NodeRecord, PipeRecord};
use hn_hydraulics::{PipeResistance, velocity};
use hn_solver::{NetworkKind, SolverConfig, SolverError, Termination, solve_records};

fn node(id: &str, kind: NodeKind, elevation: f64, demand: f64, head: Option<f64>) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        kind,
        elevation,
        demand,
        head,
    }
}

fn pipe(id: &str, source: &str, target: &str, length: f64, diameter_mm: f64) -> PipeRecord {
    PipeRecord {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        length,
        diameter_mm,
        roughness: 140.0,
        initial_flow: None,
    }
}

#[test]
fn reservoir_feeding_one_junction() {
    let nodes = vec![
        node("R", NodeKind::Reservoir, 95.0, 0.0, Some(100.0)),
        node("J", NodeKind::Junction, 20.0, 0.02, None),
    ];
    let pipes = vec![pipe("P", "R", "J", 500.0, 150.0)];

    let solution = solve_records(&nodes, &pipes, &SolverConfig::default()).unwrap();

    let hf = PipeResistance::new(500.0, 150.0, 140.0).unwrap().head_loss(0.02);
    assert!((hf - 4.156).abs() < 0.01, "hf = {hf}");

    let p = solution.pipe("P").unwrap();
    assert_eq!(p.flow, 0.02);
    assert!((p.head_loss - hf).abs() < 1e-12);
    assert!((p.velocity - velocity(0.02, 150.0)).abs() < 1e-12);

    let j = solution.node("J").unwrap();
    assert!((j.pressure - (100.0 - hf - 20.0)).abs() < 1e-9);
    assert_eq!(solution.node("R").unwrap().head, 100.0);

    assert!(solution.converged);
    assert_eq!(solution.termination, Termination::Converged);
    assert_eq!(solution.iterations_run, 0);
    assert_eq!(solution.error_final, 0.0);
    assert!(solution.iteration_log.is_empty());
    assert_eq!(solution.kind, NetworkKind::Open);
}

#[test]
fn every_pipe_carries_its_downstream_demand() {
    //            B (0.003)
    //           /
    // R -- A --+-- C (0.004) -- D (0.001)
    //  (0.002)  \
    //            E (0.0)
    let nodes = vec![
        node("R", NodeKind::Reservoir, 120.0, 0.0, None),
        node("A", NodeKind::Junction, 80.0, 0.002, None),
        node("B", NodeKind::Junction, 70.0, 0.003, None),
        node("C", NodeKind::Junction, 75.0, 0.004, None),
        node("D", NodeKind::Junction, 72.0, 0.001, None),
        node("E", NodeKind::Junction, 70.0, 0.0, None),
    ];
    let pipes = vec![
        pipe("RA", "R", "A", 400.0, 150.0),
        pipe("AB", "A", "B", 200.0, 75.0),
        pipe("AC", "A", "C", 200.0, 100.0),
        // declared upstream of its flow
        pipe("DC", "D", "C", 150.0, 50.0),
        pipe("AE", "A", "E", 100.0, 50.0),
    ];

    let solution = solve_records(&nodes, &pipes, &SolverConfig::default()).unwrap();
    let flow = |id: &str| solution.pipe(id).unwrap().flow;

    assert!((flow("RA") - 0.010).abs() < 1e-15);
    assert!((flow("AB") - 0.003).abs() < 1e-15);
    assert!((flow("AC") - 0.005).abs() < 1e-15);
    assert!((flow("DC") + 0.001).abs() < 1e-15);
    assert_eq!(flow("AE"), 0.0);

    let e = solution.pipe("AE").unwrap();
    assert!(e.stagnant);
    assert_eq!(e.velocity, 0.0);
    assert!(!solution.pipe("DC").unwrap().stagnant);

    // Head drops along the flow, whichever way the pipe was declared
    let head = |id: &str| solution.node(id).unwrap().head;
    assert!(head("D") < head("C"));
    let dc = solution.pipe("DC").unwrap();
    assert!((head("D") - (head("C") + dc.head_loss)).abs() < 1e-9);

    assert_eq!(solution.iterations_run, 0);
    let summary = solution.summary();
    assert_eq!(summary.node_count, 6);
    assert!((summary.total_demand - 0.010).abs() < 1e-15);
    assert_eq!(summary.max_velocity.unwrap().element, "AB");
}

#[test]
fn structural_errors_abort_before_solving() {
    let nodes = vec![
        node("R", NodeKind::Reservoir, 100.0, 0.0, None),
        node("J", NodeKind::Junction, 20.0, 0.01, None),
        node("X", NodeKind::Junction, 20.0, 0.01, None),
    ];

    let unknown = vec![pipe("P", "R", "Q", 100.0, 100.0)];
    assert!(matches!(
        solve_records(&nodes, &unknown, &SolverConfig::default()),
        Err(SolverError::Structural(_))
    ));

    // X is not connected to anything
    let orphaned = vec![pipe("P", "R", "J", 100.0, 100.0)];
    assert!(matches!(
        solve_records(&nodes, &orphaned, &SolverConfig::default()),
        Err(SolverError::Structural(_))
    ));
}

#[test]
fn bad_configuration_is_rejected() {
    let nodes = vec![
        node("R", NodeKind::Reservoir, 100.0, 0.0, None),
        node("J", NodeKind::Junction, 20.0, 0.01, None),
    ];
    let pipes = vec![pipe("P", "R", "J", 100.0, 100.0)];

    let config = SolverConfig {
        tolerance: 0.0,
        ..SolverConfig::default()
    };
    assert!(matches!(
        solve_records(&nodes, &pipes, &config),
        Err(SolverError::Configuration { .. })
    ));

    let config = SolverConfig {
        max_iterations: 0,
        ..SolverConfig::default()
    };
    assert!(matches!(
        solve_records(&nodes, &pipes, &config),
        Err(SolverError::Configuration { .. })
    ));
}
