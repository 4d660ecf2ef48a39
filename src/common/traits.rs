//! Common traits defining the seams between the model and the integrator

use nalgebra::DVector;

use crate::common::error::SimulationResult;
use crate::common::types::Pose2D;
use crate::model::graphic::{GraphicGeometry, Shape};

/// Trait for continuous-time vehicle models
///
/// The integrator only sees this trait, so any model exposing a state
/// derivative can be driven by the same fixed-step schemes.
pub trait DynamicsModel {
    /// State dimension
    fn nx(&self) -> usize;

    /// Control input dimension
    fn nu(&self) -> usize;

    /// Time derivative of `state` under `input`
    ///
    /// Must not mutate its arguments and must return a vector of length `nx`.
    /// Fails with `InvalidDimension` when either argument has the wrong length.
    fn dynamics(&self, state: &DVector<f64>, input: &DVector<f64>) -> SimulationResult<DVector<f64>>;
}

/// Trait for models that can be projected onto drawable primitives
pub trait GraphicModel {
    /// Labeled shapes describing the vehicle at `state`
    fn graphic_model(&self, state: &DVector<f64>, geometry: &GraphicGeometry) -> SimulationResult<Vec<Shape>>;
}

/// Trait for articulated vehicles exposing per-body poses
pub trait ArticulatedVehicle {
    /// Pose of the leading (towing) body
    fn tractor_pose(&self, state: &DVector<f64>) -> SimulationResult<Pose2D>;

    /// Pose of the towed body
    fn trailer_pose(&self, state: &DVector<f64>) -> SimulationResult<Pose2D>;

    /// Hitch angle, trailer heading minus tractor heading
    fn hitch_angle(&self, state: &DVector<f64>) -> SimulationResult<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::SimulationError;

    // Test that the dynamics seam accepts a minimal model
    struct ConstantDrift;

    impl DynamicsModel for ConstantDrift {
        fn nx(&self) -> usize {
            1
        }

        fn nu(&self) -> usize {
            1
        }

        fn dynamics(&self, state: &DVector<f64>, input: &DVector<f64>) -> SimulationResult<DVector<f64>> {
            if state.len() != 1 {
                return Err(SimulationError::state_dimension(1, state.len()));
            }
            Ok(input.clone())
        }
    }

    #[test]
    fn test_dynamics_model_trait() {
        let model = ConstantDrift;
        let dx = model.dynamics(&DVector::from_element(1, 0.0), &DVector::from_element(1, 2.0));
        assert_eq!(dx.unwrap()[0], 2.0);
        assert!(model.dynamics(&DVector::zeros(2), &DVector::zeros(1)).is_err());
    }
}
