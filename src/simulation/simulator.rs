//! Multi-step simulation driver
//!
//! Runs a model over a time-ordered sequence of control inputs and
//! materializes the full trajectory. Step `i + 1` depends only on the state
//! at step `i` and the input column `i`.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::common::{ControlInput, DynamicsModel, SimulationError, SimulationResult};
use crate::model::{TractorTrailerModel, TractorTrailerParams};
use crate::simulation::integrator::Integrator;
use crate::simulation::trajectory::Trajectory;

/// Simulator owning a model and its integrator
#[derive(Debug, Clone)]
pub struct Simulator<M: DynamicsModel> {
    model: M,
    integrator: Integrator,
    last_result: Option<Trajectory>,
}

impl Simulator<TractorTrailerModel> {
    /// Build a tractor-trailer simulator from configuration
    pub fn from_params(params: &TractorTrailerParams) -> SimulationResult<Self> {
        let model = TractorTrailerModel::from_params(params)?;
        let integrator = Integrator::from_name(&params.discrete_method, params.step_size)?;
        Ok(Self::new(model, integrator))
    }
}

impl<M: DynamicsModel> Simulator<M> {
    pub fn new(model: M, integrator: Integrator) -> Self {
        Simulator {
            model,
            integrator,
            last_result: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Trajectory of the most recent successful run
    pub fn last_result(&self) -> Option<&Trajectory> {
        self.last_result.as_ref()
    }

    /// Integrate from `initial_state` over every column of `inputs`
    ///
    /// `inputs` must have `nu` rows and one column per step. The returned
    /// trajectory has `inputs.ncols() + 1` samples. Any error aborts the run
    /// and leaves the previous result untouched.
    pub fn run(&mut self, initial_state: &DVector<f64>, inputs: &DMatrix<f64>) -> SimulationResult<Trajectory> {
        let (nx, nu) = (self.model.nx(), self.model.nu());

        if initial_state.len() != nx {
            return Err(SimulationError::state_dimension(nx, initial_state.len()));
        }
        if inputs.nrows() != nu {
            return Err(SimulationError::DimensionMismatch {
                expected: nu,
                actual: inputs.nrows(),
            });
        }

        let steps = inputs.ncols();
        let h = self.integrator.step_size();
        debug!(
            "Simulating {} steps with {} (h = {}, nx = {})",
            steps,
            self.integrator.scheme(),
            h,
            nx
        );

        let mut states = DMatrix::<f64>::zeros(nx, steps + 1);
        states.set_column(0, initial_state);

        let mut state = initial_state.clone();
        for (i, input) in inputs.column_iter().enumerate() {
            state = self.integrator.step(&self.model, state, &input.into_owned())?;
            states.set_column(i + 1, &state);
        }

        let time: Vec<f64> = (0..=steps).map(|i| i as f64 * h).collect();

        let mut padded_inputs = DMatrix::<f64>::zeros(nu, steps + 1);
        padded_inputs.columns_mut(0, steps).copy_from(inputs);

        let trajectory = Trajectory::new(time, states, padded_inputs);
        if !trajectory.is_finite() {
            warn!("Trajectory contains non-finite states, check the model geometry");
        }
        debug!("Final state: {:?}", trajectory.final_state().as_slice());

        self.last_result = Some(trajectory.clone());
        Ok(trajectory)
    }

    /// Integrate `steps` steps under a constant control input
    pub fn run_constant(
        &mut self,
        initial_state: &DVector<f64>,
        input: ControlInput,
        steps: usize,
    ) -> SimulationResult<Trajectory> {
        let inputs = DMatrix::from_fn(ControlInput::DIM, steps, |row, _| match row {
            0 => input.v,
            _ => input.w,
        });
        self.run(initial_state, &inputs)
    }
}
