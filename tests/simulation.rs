use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};

use tractor_trailer_sim::{
    ArticulatedVehicle, ControlInput, DiscretizationScheme, DynamicsModel, GraphicGeometry,
    GraphicModel, Integrator, Shape, SimulationError, Simulator, StateLayout, TractorTrailerModel,
    TractorTrailerParams,
};

fn params_from_yaml(yaml: &str) -> TractorTrailerParams {
    serde_yaml::from_str(yaml).expect("Failed to parse YAML")
}

#[test]
fn reduced_euler_scenario_from_config() {
    let params = params_from_yaml(
        "
nx: 4
nu: 2
length_front: 1.0
length_back: 0.5
discrete_method: KR1
step_size: 0.1
",
    );
    let mut sim = Simulator::from_params(&params).unwrap();
    let inputs = DMatrix::from_fn(2, 10, |row, _| if row == 0 { 1.0 } else { 0.0 });
    let traj = sim.run(&DVector::zeros(4), &inputs).unwrap();

    assert_eq!(traj.len(), 11);
    assert_relative_eq!(traj.time()[10], 1.0, epsilon = 1e-12);

    let end = traj.final_state();
    assert_relative_eq!(end[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(end[1], 0.0);
    assert_relative_eq!(end[2], 0.0);
    assert_relative_eq!(end[3], 0.0);
}

#[test]
fn exported_records_match_trajectory() {
    let params = TractorTrailerParams::default().with_discrete_method("rk4");
    let mut sim = Simulator::from_params(&params).unwrap();
    let traj = sim
        .run_constant(&DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]), ControlInput::new(1.0, 0.3), 30)
        .unwrap();

    let records = traj.records(sim.model()).unwrap();
    assert_eq!(records.len(), traj.len());

    for (i, record) in records.iter().enumerate() {
        let state = traj.state_at(i).unwrap();
        assert_relative_eq!(record.t, traj.time()[i]);
        assert_relative_eq!(record.x2, state[0]);
        assert_relative_eq!(record.y2, state[1]);
        assert_relative_eq!(record.theta2, state[2]);
        assert_relative_eq!(record.gamma, state[3], epsilon = 1e-12);
    }

    let last = records.last().unwrap();
    assert_eq!(last.v, 0.0);
    assert_eq!(last.w, 0.0);
    assert_relative_eq!(records[0].w, 0.3);
}

#[test]
fn turning_tractor_builds_hitch_angle() {
    let model = TractorTrailerModel::new(StateLayout::Reduced, 1.0, 0.5);
    let integrator = Integrator::new(DiscretizationScheme::Rk4, 0.05).unwrap();
    let mut sim = Simulator::new(model, integrator);

    // Left turn: the tractor heading leads the trailer, so gamma goes negative
    let traj = sim
        .run_constant(&DVector::zeros(4), ControlInput::new(1.0, 0.5), 100)
        .unwrap();
    let end = traj.final_state();
    assert!(end[3] < 0.0);
    assert!(end[2] > 0.0);

    let tractor = sim.model().tractor_pose(&end).unwrap();
    let trailer = sim.model().trailer_pose(&end).unwrap();
    assert!(tractor.yaw > trailer.yaw);
}

#[test]
fn errors_abort_the_run() {
    let mut sim = Simulator::from_params(&TractorTrailerParams::default()).unwrap();

    let err = sim.run(&DVector::zeros(4), &DMatrix::zeros(3, 5)).unwrap_err();
    assert_eq!(err, SimulationError::DimensionMismatch { expected: 2, actual: 3 });

    let err = sim.run(&DVector::zeros(5), &DMatrix::zeros(2, 5)).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidDimension { .. }));

    let bad = TractorTrailerParams::default().with_discrete_method("implicit_euler");
    assert!(matches!(
        Simulator::from_params(&bad),
        Err(SimulationError::UnsupportedScheme(_))
    ));

    let bad = TractorTrailerParams::default().with_step_size(0.0);
    assert!(matches!(
        Simulator::from_params(&bad),
        Err(SimulationError::InvalidParameter(_))
    ));
}

#[test]
fn independent_runs_in_parallel_threads() {
    let handles: Vec<_> = [0.1, 0.2, 0.3]
        .iter()
        .map(|&w| {
            std::thread::spawn(move || {
                let mut sim = Simulator::from_params(&TractorTrailerParams::default()).unwrap();
                sim.run_constant(&DVector::zeros(4), ControlInput::new(1.0, w), 50)
                    .unwrap()
                    .final_state()
            })
        })
        .collect();

    let results: Vec<DVector<f64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let mut sim = Simulator::from_params(&TractorTrailerParams::default()).unwrap();
    let sequential = sim
        .run_constant(&DVector::zeros(4), ControlInput::new(1.0, 0.2), 50)
        .unwrap()
        .final_state();
    assert_eq!(results[1], sequential);
}

#[test]
fn graphic_model_follows_full_state() {
    let model = TractorTrailerModel::new(StateLayout::Full, 1.0, 0.5);
    let state = model
        .from_reduced(&DVector::from_vec(vec![3.0, 1.0, 0.0, 0.0]))
        .unwrap();
    assert_eq!(state.len(), model.nx());

    let shapes = model.graphic_model(&state, &GraphicGeometry::default()).unwrap();
    match &shapes[2] {
        Shape::Circle { label, center, .. } => {
            assert_eq!(label, "hitch_joint");
            assert_relative_eq!(center.x, 4.0);
            assert_relative_eq!(center.y, 1.0);
        }
        other => panic!("expected hitch circle, got {:?}", other),
    }
}
