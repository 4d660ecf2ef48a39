//! Result of a simulation run

use itertools::izip;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::common::{ArticulatedVehicle, Pose2D, SimulationResult};

/// Time axis, states and right-padded inputs of a completed run
///
/// Column `i` of `states` and `inputs` belongs to `time[i]`. The input
/// matrix carries a zero column for the terminal sample so that all three
/// have the same number of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    states: DMatrix<f64>,
    inputs: DMatrix<f64>,
}

/// One exported sample: poses of both bodies plus the applied input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRecord {
    pub t: f64,
    pub x1: f64,
    pub y1: f64,
    pub theta1: f64,
    pub x2: f64,
    pub y2: f64,
    pub theta2: f64,
    pub gamma: f64,
    pub v: f64,
    pub w: f64,
}

impl Trajectory {
    pub(crate) fn new(time: Vec<f64>, states: DMatrix<f64>, inputs: DMatrix<f64>) -> Self {
        debug_assert_eq!(time.len(), states.ncols());
        debug_assert_eq!(time.len(), inputs.ncols());
        Self { time, states, inputs }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// `nx x (steps + 1)` state matrix
    pub fn states(&self) -> &DMatrix<f64> {
        &self.states
    }

    /// `nu x (steps + 1)` input matrix, last column zero
    pub fn inputs(&self) -> &DMatrix<f64> {
        &self.inputs
    }

    /// Number of samples, `steps + 1`
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn state_at(&self, index: usize) -> Option<DVector<f64>> {
        if index < self.states.ncols() {
            Some(self.states.column(index).into_owned())
        } else {
            None
        }
    }

    pub fn input_at(&self, index: usize) -> Option<DVector<f64>> {
        if index < self.inputs.ncols() {
            Some(self.inputs.column(index).into_owned())
        } else {
            None
        }
    }

    pub fn final_state(&self) -> DVector<f64> {
        self.states.column(self.states.ncols() - 1).into_owned()
    }

    /// Whether every state entry is finite
    pub fn is_finite(&self) -> bool {
        self.states.iter().all(|x| x.is_finite())
    }

    /// Tractor pose at every sample
    pub fn tractor_poses<V: ArticulatedVehicle + ?Sized>(&self, vehicle: &V) -> SimulationResult<Vec<Pose2D>> {
        self.states
            .column_iter()
            .map(|column| vehicle.tractor_pose(&column.into_owned()))
            .collect()
    }

    /// Trailer pose at every sample
    pub fn trailer_poses<V: ArticulatedVehicle + ?Sized>(&self, vehicle: &V) -> SimulationResult<Vec<Pose2D>> {
        self.states
            .column_iter()
            .map(|column| vehicle.trailer_pose(&column.into_owned()))
            .collect()
    }

    /// Flatten the run into one record per sample for export
    pub fn records<V: ArticulatedVehicle + ?Sized>(&self, vehicle: &V) -> SimulationResult<Vec<TrajectoryRecord>> {
        let tractor = self.tractor_poses(vehicle)?;
        let trailer = self.trailer_poses(vehicle)?;

        let records = izip!(&self.time, tractor, trailer, self.inputs.column_iter())
            .map(|(&t, p1, p2, u)| TrajectoryRecord {
                t,
                x1: p1.x,
                y1: p1.y,
                theta1: p1.yaw,
                x2: p2.x,
                y2: p2.y,
                theta2: p2.yaw,
                gamma: p2.yaw - p1.yaw,
                v: u[0],
                w: u[1],
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StateLayout, TractorTrailerModel};
    use approx::assert_relative_eq;

    fn sample_trajectory() -> Trajectory {
        let time = vec![0.0, 0.1, 0.2];
        let states = DMatrix::from_columns(&[
            DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]),
            DVector::from_vec(vec![0.1, 0.0, 0.0, 0.0]),
            DVector::from_vec(vec![0.2, 0.0, 0.0, 0.1]),
        ]);
        let inputs = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 0.0, 0.0, -0.5, 0.0]);
        Trajectory::new(time, states, inputs)
    }

    #[test]
    fn test_accessors() {
        let traj = sample_trajectory();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.steps(), 2);
        assert!(!traj.is_empty());
        assert_eq!(traj.final_state()[0], 0.2);
        assert_eq!(traj.state_at(1).unwrap()[0], 0.1);
        assert!(traj.state_at(3).is_none());
        assert_eq!(traj.input_at(1).unwrap()[1], -0.5);
        assert!(traj.is_finite());
    }

    #[test]
    fn test_records() {
        let model = TractorTrailerModel::new(StateLayout::Reduced, 1.0, 0.5);
        let records = sample_trajectory().records(&model).unwrap();
        assert_eq!(records.len(), 3);

        assert_relative_eq!(records[0].x1, 1.5);
        assert_relative_eq!(records[1].t, 0.1);
        assert_relative_eq!(records[1].x2, 0.1);
        assert_relative_eq!(records[1].w, -0.5);
        assert_relative_eq!(records[2].gamma, 0.1, epsilon = 1e-12);
        assert_eq!(records[2].v, 0.0);
    }

    #[test]
    fn test_poses_reject_mismatched_layout() {
        let model = TractorTrailerModel::new(StateLayout::Full, 1.0, 0.5);
        assert!(sample_trajectory().tractor_poses(&model).is_err());
    }
}
