//! springmass library
//!
//! The simulation core (`physics`, `simulation`) runs without a window; the
//! plugins put it on screen. Exposed as a library to enable integration
//! testing and benchmarks.

pub mod cli;
pub mod config;
pub mod events;
pub mod headless;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod simulation;
pub mod states;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used items
pub use config::SimulationConfig;
pub use events::*;
pub use physics::{integrators, math::Scalar};
pub use plugins::{
    chart::ChartPlugin, controls::ControlsPlugin, readout::ReadoutPlugin,
    schematic::SchematicPlugin, simulation::SimulationPlugin,
};
pub use states::AppState;
