use hn_graph::NodeKind;
use hn_project::*;
use hn_validate::Ambit;

fn node(id: &str, kind: NodeKind, elevation: f64, demand: f64) -> NodeDef {
    NodeDef {
        id: id.to_string(),
        name: String::new(),
        kind,
        elevation,
        demand,
        head: None,
    }
}

fn pipe(id: &str, from: &str, to: &str) -> PipeDef {
    PipeDef {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        length: 100.0,
        diameter_mm: 84.0,
        roughness: Some(150.0),
        material: None,
        initial_flow: None,
    }
}

fn simple_project() -> Project {
    Project {
        version: LATEST_VERSION,
        name: "Simple".to_string(),
        ambit: Ambit::Urban,
        nodes: vec![
            node("R", NodeKind::Reservoir, 100.0, 0.0),
            node("A", NodeKind::Junction, 70.0, 0.002),
            node("B", NodeKind::Junction, 68.0, 0.001),
        ],
        pipes: vec![pipe("P1", "R", "A"), pipe("P2", "A", "B")],
        solver: None,
        limits: None,
        optimizer: None,
    }
}

#[test]
fn roundtrip_yaml() {
    let project = simple_project();
    let path = std::env::temp_dir().join("hn_project_roundtrip.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_with_settings() {
    let mut project = simple_project();
    project.solver = Some(hn_solver::SolverConfig {
        tolerance: 1e-6,
        ..Default::default()
    });
    project.limits = Some(hn_validate::NormativeLimits::rural());
    let path = std::env::temp_dir().join("hn_project_roundtrip.json");

    save_json(&path, &project).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn duplicate_and_dangling_ids_rejected() {
    let mut project = simple_project();
    project.nodes.push(node("A", NodeKind::Junction, 0.0, 0.0));
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::DuplicateId { .. })
    ));

    let mut project = simple_project();
    project.pipes.push(pipe("P3", "B", "Z"));
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::MissingReference { .. })
    ));
}

#[test]
fn bad_values_rejected() {
    let mut project = simple_project();
    project.pipes[0].diameter_mm = 0.0;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::InvalidValue { .. })
    ));

    let mut project = simple_project();
    project.nodes[1].demand = -0.001;
    assert!(validate_project(&project).is_err());

    let mut project = simple_project();
    project.nodes[1].head = Some(90.0);
    assert!(validate_project(&project).is_err());

    let mut project = simple_project();
    project.version = LATEST_VERSION + 1;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::UnsupportedVersion { .. })
    ));
}

#[test]
fn network_without_source_rejected() {
    let mut project = simple_project();
    project.nodes[0].kind = NodeKind::Junction;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::Settings { .. })
    ));
}

#[test]
fn bad_settings_rejected() {
    let mut project = simple_project();
    project.solver = Some(hn_solver::SolverConfig {
        max_iterations: 0,
        ..Default::default()
    });
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::Settings { .. })
    ));
}
