//! Common types, traits, and error definitions for tractor_trailer_sim
//!
//! This module provides the foundational building blocks shared by the
//! vehicle model and the integration engine.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
