//! Drawable primitives describing the vehicle
//!
//! This is a read-only projection of the state for a rendering
//! collaborator. Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::common::{Point2D, Pose2D};

/// Gap between a body and its wheels [m]
const WHEEL_CLEARANCE: f64 = 0.05;

/// Labeled geometric primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Rectangle centered on `pose`, `width` along the heading
    Rectangle {
        label: String,
        pose: Pose2D,
        width: f64,
        height: f64,
    },
    Circle {
        label: String,
        center: Point2D,
        radius: f64,
    },
}

impl Shape {
    pub fn rectangle(label: &str, pose: Pose2D, width: f64, height: f64) -> Self {
        Shape::Rectangle {
            label: label.to_string(),
            pose,
            width,
            height,
        }
    }

    pub fn circle(label: &str, center: Point2D, radius: f64) -> Self {
        Shape::Circle {
            label: label.to_string(),
            center,
            radius,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Shape::Rectangle { label, .. } | Shape::Circle { label, .. } => label,
        }
    }

    pub fn center(&self) -> Point2D {
        match self {
            Shape::Rectangle { pose, .. } => pose.position(),
            Shape::Circle { center, .. } => *center,
        }
    }
}

/// Size of a rectangular part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSize {
    pub width: f64,
    pub height: f64,
}

impl RectSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Size of a circular part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSize {
    pub radius: f64,
}

mod defaults {
    use super::{CircleSize, RectSize};

    pub fn tractor() -> RectSize {
        RectSize::new(1.0, 0.6)
    }

    pub fn trailer() -> RectSize {
        RectSize::new(1.4, 0.7)
    }

    pub fn hitch_joint() -> CircleSize {
        CircleSize { radius: 0.08 }
    }

    pub fn front_wheels() -> RectSize {
        RectSize::new(0.3, 0.1)
    }

    pub fn back_wheels() -> RectSize {
        RectSize::new(0.3, 0.1)
    }
}

/// Dimensions of the drawn parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicGeometry {
    #[serde(default = "defaults::tractor")]
    pub tractor: RectSize,
    #[serde(default = "defaults::trailer")]
    pub trailer: RectSize,
    #[serde(default = "defaults::hitch_joint")]
    pub hitch_joint: CircleSize,
    #[serde(default = "defaults::front_wheels")]
    pub front_wheels: RectSize,
    #[serde(default = "defaults::back_wheels")]
    pub back_wheels: RectSize,
}

impl Default for GraphicGeometry {
    fn default() -> Self {
        Self {
            tractor: defaults::tractor(),
            trailer: defaults::trailer(),
            hitch_joint: defaults::hitch_joint(),
            front_wheels: defaults::front_wheels(),
            back_wheels: defaults::back_wheels(),
        }
    }
}

/// Body rectangle plus the right and left wheels of one vehicle unit
fn unit_shapes(
    name: &str,
    wheel_prefix: &str,
    pose: &Pose2D,
    body: &RectSize,
    wheel: &RectSize,
) -> [Shape; 3] {
    let offset = body.height / 2.0 + wheel.height / 2.0 + WHEEL_CLEARANCE;

    [
        Shape::rectangle(name, pose.ahead(body.width / 4.0), body.width, body.height),
        Shape::rectangle(
            &format!("{}_right_wheel", wheel_prefix),
            pose.lateral(-offset),
            wheel.width,
            wheel.height,
        ),
        Shape::rectangle(
            &format!("{}_left_wheel", wheel_prefix),
            pose.lateral(offset),
            wheel.width,
            wheel.height,
        ),
    ]
}

/// Shapes for a tractor and trailer at the given poses
///
/// Order: tractor, trailer, hitch joint, tractor wheels (right, left),
/// trailer wheels (right, left).
pub fn vehicle_shapes(
    tractor: &Pose2D,
    trailer: &Pose2D,
    length_front: f64,
    geometry: &GraphicGeometry,
) -> Vec<Shape> {
    let [tractor_body, front_right, front_left] =
        unit_shapes("tractor", "front", tractor, &geometry.tractor, &geometry.front_wheels);
    let [trailer_body, rear_right, rear_left] =
        unit_shapes("trailer", "rear", trailer, &geometry.trailer, &geometry.back_wheels);

    let hitch = Shape::circle(
        "hitch_joint",
        trailer.ahead(length_front).position(),
        geometry.hitch_joint.radius,
    );

    vec![
        tractor_body,
        trailer_body,
        hitch,
        front_right,
        front_left,
        rear_right,
        rear_left,
    ]
}
