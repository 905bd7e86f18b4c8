//! Physics of the single-degree-of-freedom spring-mass-damper

pub mod dynamics;
pub mod integrators;
pub mod math;
pub mod parameters;
pub mod state;
