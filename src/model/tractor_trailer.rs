//! Kinematic tractor-trailer model
//!
//! The tractor is driven by a forward speed `v` and a yaw rate `w`. The
//! trailer is attached through a hitch located `length_back` behind the
//! tractor reference point and `length_front` ahead of the trailer reference
//! point. Two state layouts are supported:
//!
//! * `Full`: `[x1, y1, theta1, x2, y2, theta2]`, tractor and trailer poses
//! * `Reduced`: `[x2, y2, theta2, gamma]`, trailer pose and hitch angle
//!   `gamma = theta2 - theta1`
//!
//! Angles are never wrapped. A zero `length_front` is not rejected and makes
//! the trailer rates non-finite.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::common::{
    ArticulatedVehicle, DynamicsModel, GraphicModel, Pose2D, SimulationError, SimulationResult,
};
use crate::model::graphic::{vehicle_shapes, GraphicGeometry, Shape};

/// Ordering of the state vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateLayout {
    /// `[x1, y1, theta1, x2, y2, theta2]`
    Full,
    /// `[x2, y2, theta2, gamma]`
    Reduced,
}

impl StateLayout {
    /// State dimension of the layout
    pub fn nx(self) -> usize {
        match self {
            StateLayout::Full => 6,
            StateLayout::Reduced => 4,
        }
    }

    /// Layout for a configured state dimension
    pub fn from_nx(nx: usize) -> SimulationResult<Self> {
        match nx {
            6 => Ok(StateLayout::Full),
            4 => Ok(StateLayout::Reduced),
            _ => Err(SimulationError::InvalidParameter(format!(
                "nx must be 4 (reduced) or 6 (full), got {}",
                nx
            ))),
        }
    }
}

mod defaults {
    pub fn nx() -> usize {
        4
    }

    pub fn nu() -> usize {
        2
    }

    pub fn discrete_method() -> String {
        "rk4".to_string()
    }
}

/// Model parameters, as handed over by the configuration collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TractorTrailerParams {
    /// State dimension (4 or 6)
    #[serde(default = "defaults::nx")]
    pub nx: usize,
    /// Control input dimension (always 2)
    #[serde(default = "defaults::nu")]
    pub nu: usize,
    /// Distance from the trailer reference point to the hitch [m]
    pub length_front: f64,
    /// Distance from the hitch to the tractor reference point [m]
    pub length_back: f64,
    /// Discretization scheme name ("euler"/"KR1" or "rk4"/"KR4")
    #[serde(default = "defaults::discrete_method")]
    pub discrete_method: String,
    /// Integration step [s]
    pub step_size: f64,
}

impl Default for TractorTrailerParams {
    fn default() -> Self {
        Self {
            nx: defaults::nx(),
            nu: defaults::nu(),
            length_front: 1.0,
            length_back: 0.5,
            discrete_method: defaults::discrete_method(),
            step_size: 0.1,
        }
    }
}

impl TractorTrailerParams {
    pub fn with_layout(mut self, layout: StateLayout) -> Self {
        self.nx = layout.nx();
        self
    }

    pub fn with_lengths(mut self, length_front: f64, length_back: f64) -> Self {
        self.length_front = length_front;
        self.length_back = length_back;
        self
    }

    pub fn with_discrete_method(mut self, method: &str) -> Self {
        self.discrete_method = method.to_string();
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }
}

/// Kinematic tractor-trailer vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct TractorTrailerModel {
    layout: StateLayout,
    lf: f64,
    lb: f64,
}

impl TractorTrailerModel {
    pub const NU: usize = 2;

    pub fn new(layout: StateLayout, length_front: f64, length_back: f64) -> Self {
        Self {
            layout,
            lf: length_front,
            lb: length_back,
        }
    }

    /// Build the model from configuration, rejecting unsupported dimensions
    pub fn from_params(params: &TractorTrailerParams) -> SimulationResult<Self> {
        let layout = StateLayout::from_nx(params.nx)?;
        if params.nu != Self::NU {
            return Err(SimulationError::InvalidParameter(format!(
                "nu must be {}, got {}",
                Self::NU,
                params.nu
            )));
        }
        Ok(Self::new(layout, params.length_front, params.length_back))
    }

    pub fn layout(&self) -> StateLayout {
        self.layout
    }

    pub fn length_front(&self) -> f64 {
        self.lf
    }

    pub fn length_back(&self) -> f64 {
        self.lb
    }

    /// Trailer rates `[x2_dot, y2_dot, theta2_dot]` for a trailer heading and hitch angle
    fn trailer_rates(&self, theta2: f64, gamma: f64, v: f64, w: f64) -> (f64, f64, f64) {
        let (sin_t2, cos_t2) = theta2.sin_cos();
        let (sin_g, cos_g) = gamma.sin_cos();
        let ratio = self.lb / self.lf;

        let x2_dot = v * cos_t2 * cos_g - w * self.lb * cos_t2 * sin_g;
        let y2_dot = v * sin_t2 * cos_g - w * self.lb * sin_t2 * sin_g;
        let theta2_dot = -v / self.lf * sin_g - w * ratio * cos_g;

        (x2_dot, y2_dot, theta2_dot)
    }

    /// Tractor pose from a reduced state `[x2, y2, theta2, gamma]`
    ///
    /// Used for rendering and export only. The state must have exactly four
    /// entries regardless of the configured layout.
    pub fn compute_tractor_pose(&self, state: &DVector<f64>) -> SimulationResult<Pose2D> {
        if state.len() != StateLayout::Reduced.nx() {
            return Err(SimulationError::state_dimension(StateLayout::Reduced.nx(), state.len()));
        }
        let (x2, y2, theta2, gamma) = (state[0], state[1], state[2], state[3]);
        let theta1 = theta2 - gamma;

        Ok(Pose2D::new(
            x2 + self.lf * theta2.cos() + self.lb * theta1.cos(),
            y2 + self.lf * theta2.sin() + self.lb * theta1.sin(),
            theta1,
        ))
    }

    /// Convert a state of this model's layout into the reduced layout
    pub fn to_reduced(&self, state: &DVector<f64>) -> SimulationResult<DVector<f64>> {
        self.check_state(state)?;
        match self.layout {
            StateLayout::Reduced => Ok(state.clone()),
            StateLayout::Full => Ok(DVector::from_vec(vec![
                state[3],
                state[4],
                state[5],
                state[5] - state[2],
            ])),
        }
    }

    /// Convert a reduced state into this model's layout
    ///
    /// For the full layout the tractor pose is reconstructed from the hitch
    /// geometry.
    pub fn from_reduced(&self, reduced: &DVector<f64>) -> SimulationResult<DVector<f64>> {
        let tractor = self.compute_tractor_pose(reduced)?;
        match self.layout {
            StateLayout::Reduced => Ok(reduced.clone()),
            StateLayout::Full => Ok(DVector::from_vec(vec![
                tractor.x,
                tractor.y,
                tractor.yaw,
                reduced[0],
                reduced[1],
                reduced[2],
            ])),
        }
    }

    fn check_state(&self, state: &DVector<f64>) -> SimulationResult<()> {
        if state.len() != self.layout.nx() {
            return Err(SimulationError::state_dimension(self.layout.nx(), state.len()));
        }
        Ok(())
    }
}

impl DynamicsModel for TractorTrailerModel {
    fn nx(&self) -> usize {
        self.layout.nx()
    }

    fn nu(&self) -> usize {
        Self::NU
    }

    fn dynamics(&self, state: &DVector<f64>, input: &DVector<f64>) -> SimulationResult<DVector<f64>> {
        self.check_state(state)?;
        if input.len() != Self::NU {
            return Err(SimulationError::input_dimension(Self::NU, input.len()));
        }
        let (v, w) = (input[0], input[1]);

        let state_dot = match self.layout {
            StateLayout::Full => {
                let theta1 = state[2];
                let theta2 = state[5];
                let (x2_dot, y2_dot, theta2_dot) = self.trailer_rates(theta2, theta2 - theta1, v, w);

                vec![
                    v * theta1.cos(),
                    v * theta1.sin(),
                    w,
                    x2_dot,
                    y2_dot,
                    theta2_dot,
                ]
            }
            StateLayout::Reduced => {
                let theta2 = state[2];
                let gamma = state[3];
                let (x2_dot, y2_dot, theta2_dot) = self.trailer_rates(theta2, gamma, v, w);
                let gamma_dot = -v / self.lf * gamma.sin() - w * (self.lb / self.lf * gamma.cos() + 1.0);

                vec![x2_dot, y2_dot, theta2_dot, gamma_dot]
            }
        };

        Ok(DVector::from_vec(state_dot))
    }
}

impl ArticulatedVehicle for TractorTrailerModel {
    fn tractor_pose(&self, state: &DVector<f64>) -> SimulationResult<Pose2D> {
        self.check_state(state)?;
        match self.layout {
            StateLayout::Full => Ok(Pose2D::new(state[0], state[1], state[2])),
            StateLayout::Reduced => self.compute_tractor_pose(state),
        }
    }

    fn trailer_pose(&self, state: &DVector<f64>) -> SimulationResult<Pose2D> {
        self.check_state(state)?;
        let offset = match self.layout {
            StateLayout::Full => 3,
            StateLayout::Reduced => 0,
        };
        Ok(Pose2D::new(state[offset], state[offset + 1], state[offset + 2]))
    }

    fn hitch_angle(&self, state: &DVector<f64>) -> SimulationResult<f64> {
        self.check_state(state)?;
        match self.layout {
            StateLayout::Full => Ok(state[5] - state[2]),
            StateLayout::Reduced => Ok(state[3]),
        }
    }
}

impl GraphicModel for TractorTrailerModel {
    fn graphic_model(&self, state: &DVector<f64>, geometry: &GraphicGeometry) -> SimulationResult<Vec<Shape>> {
        let tractor = self.tractor_pose(state)?;
        let trailer = self.trailer_pose(state)?;
        Ok(vehicle_shapes(&tractor, &trailer, self.lf, geometry))
    }
}
