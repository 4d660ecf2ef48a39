// Tractor-trailer kinematic simulation sample
// Drives the vehicle through a slalom with both integration schemes and
// reports where the two bodies end up.

use log::info;
use nalgebra::{DMatrix, DVector};

use tractor_trailer_sim::{
    ArticulatedVehicle, GraphicGeometry, GraphicModel, SimulationResult, Simulator, StateLayout,
    TractorTrailerParams,
};

const SIM_TIME: f64 = 20.0; // [s]
const SPEED: f64 = 1.0; // [m/s]
const YAW_RATE_AMPLITUDE: f64 = 0.4; // [rad/s]
const SLALOM_PERIOD: f64 = 8.0; // [s]

fn slalom_inputs(step_size: f64) -> DMatrix<f64> {
    let steps = (SIM_TIME / step_size).round() as usize;
    DMatrix::from_fn(2, steps, |row, col| {
        let t = col as f64 * step_size;
        match row {
            0 => SPEED,
            _ => YAW_RATE_AMPLITUDE * (2.0 * std::f64::consts::PI * t / SLALOM_PERIOD).sin(),
        }
    })
}

fn main() -> SimulationResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let x0 = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]);

    for &method in &["euler", "rk4"] {
        let params = TractorTrailerParams::default()
            .with_layout(StateLayout::Reduced)
            .with_lengths(1.0, 0.5)
            .with_discrete_method(method)
            .with_step_size(0.05);

        let mut simulator = Simulator::from_params(&params)?;
        let inputs = slalom_inputs(params.step_size);
        let trajectory = simulator.run(&x0, &inputs)?;

        let model = simulator.model();
        let last = trajectory.final_state();
        let tractor = model.tractor_pose(&last)?;
        let trailer = model.trailer_pose(&last)?;

        info!(
            "[{}] {} samples, t_end = {:.2} [s]",
            method,
            trajectory.len(),
            trajectory.time()[trajectory.len() - 1]
        );
        info!(
            "[{}] tractor x={:.3} y={:.3} theta={:.2} [deg]",
            method,
            tractor.x,
            tractor.y,
            tractor.yaw.to_degrees()
        );
        info!(
            "[{}] trailer x={:.3} y={:.3} theta={:.2} [deg], hitch={:.2} [deg]",
            method,
            trailer.x,
            trailer.y,
            trailer.yaw.to_degrees(),
            model.hitch_angle(&last)?.to_degrees()
        );

        let shapes = model.graphic_model(&last, &GraphicGeometry::default())?;
        for shape in &shapes {
            let center = shape.center();
            info!("[{}] {} at ({:.3}, {:.3})", method, shape.label(), center.x, center.y);
        }
    }

    Ok(())
}
