// Numerical integration module

pub mod integrator;
pub mod simulator;
pub mod trajectory;

pub use integrator::*;
pub use simulator::*;
pub use trajectory::*;
