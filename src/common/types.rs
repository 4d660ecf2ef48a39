//! Common types used throughout tractor_trailer_sim

use nalgebra::{DVector, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

/// 2D pose (position + heading)
///
/// The heading is kept as integrated and is never wrapped to [-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.yaw)
    }

    /// Shift the pose by a world-frame offset and add `rotation` to the heading
    pub fn transformed(&self, dx: f64, dy: f64, rotation: f64) -> Pose2D {
        Pose2D::new(self.x + dx, self.y + dy, self.yaw + rotation)
    }

    /// Point `distance` ahead of the pose along its heading
    pub fn ahead(&self, distance: f64) -> Pose2D {
        self.transformed(distance * self.yaw.cos(), distance * self.yaw.sin(), 0.0)
    }

    /// Point `distance` to the left of the pose (negative for the right side)
    pub fn lateral(&self, distance: f64) -> Pose2D {
        self.transformed(-distance * self.yaw.sin(), distance * self.yaw.cos(), 0.0)
    }
}

impl From<Vector3<f64>> for Pose2D {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v[0], y: v[1], yaw: v[2] }
    }
}

/// Control input of the tractor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub v: f64, // forward speed
    pub w: f64, // yaw rate
}

impl ControlInput {
    /// Number of control channels
    pub const DIM: usize = 2;

    pub fn new(v: f64, w: f64) -> Self {
        Self { v, w }
    }

    pub fn zero() -> Self {
        Self { v: 0.0, w: 0.0 }
    }

    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.v, self.w])
    }
}

impl From<Vector2<f64>> for ControlInput {
    fn from(v: Vector2<f64>) -> Self {
        Self { v: v[0], w: v[1] }
    }
}
