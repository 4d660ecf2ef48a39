//! Fixed-step explicit integration schemes
//!
//! The control input is held constant over a step (zero-order hold), so
//! every stage of a scheme is evaluated against the same input.

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::common::{DynamicsModel, SimulationError, SimulationResult};

/// Discretization scheme used to advance the state by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscretizationScheme {
    /// Explicit (forward) Euler, first order
    Euler,
    /// Classical four-stage Runge-Kutta, fourth order
    Rk4,
}

impl DiscretizationScheme {
    /// Number of dynamics evaluations per step
    pub fn stages(self) -> usize {
        match self {
            DiscretizationScheme::Euler => 1,
            DiscretizationScheme::Rk4 => 4,
        }
    }

    /// Global order of accuracy
    pub fn order(self) -> u32 {
        match self {
            DiscretizationScheme::Euler => 1,
            DiscretizationScheme::Rk4 => 4,
        }
    }
}

impl FromStr for DiscretizationScheme {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" | "kr1" | "rk1" => Ok(DiscretizationScheme::Euler),
            "rk4" | "kr4" => Ok(DiscretizationScheme::Rk4),
            _ => Err(SimulationError::UnsupportedScheme(s.to_string())),
        }
    }
}

impl fmt::Display for DiscretizationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscretizationScheme::Euler => write!(f, "euler"),
            DiscretizationScheme::Rk4 => write!(f, "rk4"),
        }
    }
}

/// One-step integrator over any `DynamicsModel`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    scheme: DiscretizationScheme,
    step_size: f64,
}

impl Integrator {
    /// Create an integrator, rejecting non-positive or non-finite step sizes
    pub fn new(scheme: DiscretizationScheme, step_size: f64) -> SimulationResult<Self> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "step_size must be finite and positive, got {}",
                step_size
            )));
        }
        Ok(Self { scheme, step_size })
    }

    /// Create an integrator from a scheme name such as "euler", "KR1" or "rk4"
    pub fn from_name(name: &str, step_size: f64) -> SimulationResult<Self> {
        Self::new(name.parse()?, step_size)
    }

    pub fn scheme(&self) -> DiscretizationScheme {
        self.scheme
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Advance `state` by one step under `input`
    ///
    /// Consumes the previous state and returns the next one.
    pub fn step<M>(&self, model: &M, state: DVector<f64>, input: &DVector<f64>) -> SimulationResult<DVector<f64>>
    where
        M: DynamicsModel + ?Sized,
    {
        let h = self.step_size;

        match self.scheme {
            DiscretizationScheme::Euler => {
                let k1 = model.dynamics(&state, input)?;
                Ok(state + k1 * h)
            }
            DiscretizationScheme::Rk4 => {
                let k1 = model.dynamics(&state, input)?;
                let k2 = model.dynamics(&(&state + &k1 * (h / 2.0)), input)?;
                let k3 = model.dynamics(&(&state + &k2 * (h / 2.0)), input)?;
                let k4 = model.dynamics(&(&state + &k3 * h), input)?;

                Ok(state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
            }
        }
    }
}
