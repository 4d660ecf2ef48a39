//! tractor_trailer_sim - kinematic tractor-trailer simulation
//!
//! This crate integrates the kinematic equations of motion of a
//! tractor-trailer vehicle with fixed-step explicit schemes and exposes the
//! resulting trajectory, derived tractor poses and drawable primitives to
//! rendering or export code.

// Core modules
pub mod common;

// Model and integration modules
pub mod model;
pub mod simulation;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, ControlInput};
pub use common::{DynamicsModel, ArticulatedVehicle, GraphicModel};
pub use common::{SimulationError, SimulationResult};
pub use model::{StateLayout, TractorTrailerModel, TractorTrailerParams, GraphicGeometry, Shape};
pub use simulation::{DiscretizationScheme, Integrator, Simulator, Trajectory, TrajectoryRecord};
