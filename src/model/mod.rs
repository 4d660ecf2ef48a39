// Vehicle models module

pub mod graphic;
pub mod tractor_trailer;

pub use graphic::*;
pub use tractor_trailer::*;
