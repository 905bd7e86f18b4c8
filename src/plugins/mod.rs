pub mod chart;
pub mod controls;
pub mod readout;
pub mod schematic;
pub mod simulation;
