use std::path::Path;

use hn_solver::{HydraulicProblem, NetworkKind, solve};

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn demos_load_validate_and_solve() {
    let cases = [
        ("town_loop.yaml", NetworkKind::Mixed),
        ("rural_gravity.yaml", NetworkKind::Open),
        ("two_tanks.json", NetworkKind::Looped),
    ];

    for (name, kind) in cases {
        let project = hn_project::load(&demo(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let graph = project
            .build_graph()
            .unwrap_or_else(|e| panic!("Failed to build {}: {}", name, e));
        let problem = HydraulicProblem::new(&graph).unwrap();
        let solution = solve(&problem, &project.solver_config()).unwrap();

        assert!(solution.converged, "{name} did not converge");
        assert_eq!(solution.kind, kind, "{name}");
    }
}

#[test]
fn break_chamber_resets_pressure() {
    let project = hn_project::load_yaml(&demo("rural_gravity.yaml")).unwrap();
    let graph = project.build_graph().unwrap();
    let problem = HydraulicProblem::new(&graph).unwrap();
    let solution = solve(&problem, &project.solver_config()).unwrap();

    let chamber = solution.node("CRP1").unwrap();
    assert_eq!(chamber.pressure, 0.0);
    assert!(solution.node("A").unwrap().head < 3370.0);
}
