//! Output contracts of the simulation loop
//!
//! The loop pushes every committed state to a [`RenderSink`] (the schematic
//! and its readout) and a [`ChartSink`] (the displacement/velocity plot).
//! Sinks only observe; they receive copies and never feed back into the loop.

use crate::physics::math::Scalar;
use crate::physics::state::PhysicsState;
use bevy::prelude::*;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

/// Draws the schematic for one state
pub trait RenderSink {
    fn render(&mut self, state: &PhysicsState) -> Result<(), SinkError>;
}

/// Accumulates the time series behind the line chart
pub trait ChartSink {
    fn append(&mut self, sample: Sample);

    fn clear(&mut self);

    /// Request a redraw after appends or a clear
    fn redraw(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One chart point: time label plus the two plotted series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Scalar,
    pub displacement: Scalar,
    pub velocity: Scalar,
}

impl From<&PhysicsState> for Sample {
    fn from(state: &PhysicsState) -> Self {
        Self {
            time: state.elapsed,
            displacement: state.displacement,
            velocity: state.velocity,
        }
    }
}

/// Extent of a time series, used to fit the chart axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBounds {
    pub max_time: Scalar,
    pub min_value: Scalar,
    pub max_value: Scalar,
}

/// Ordered samples of one run
#[derive(Resource, Debug, Default, Clone)]
pub struct TimeSeries {
    samples: Vec<Sample>,
    /// Bumped on every redraw request so observers can skip unchanged frames
    revision: u64,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Extent over both series; `None` while empty
    pub fn bounds(&self) -> Option<SeriesBounds> {
        let first = self.samples.first()?;
        let initial = SeriesBounds {
            max_time: first.time,
            min_value: first.displacement.min(first.velocity),
            max_value: first.displacement.max(first.velocity),
        };

        Some(self.samples.iter().fold(initial, |bounds, sample| SeriesBounds {
            max_time: bounds.max_time.max(sample.time),
            min_value: bounds
                .min_value
                .min(sample.displacement)
                .min(sample.velocity),
            max_value: bounds
                .max_value
                .max(sample.displacement)
                .max(sample.velocity),
        }))
    }

    /// Writes `time,displacement,velocity` rows with a header line
    pub fn write_csv(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "time,displacement,velocity")?;
        for sample in &self.samples {
            writeln!(
                writer,
                "{:.6},{:.6},{:.6}",
                sample.time, sample.displacement, sample.velocity
            )?;
        }
        Ok(())
    }
}

impl ChartSink for TimeSeries {
    fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    fn clear(&mut self) {
        self.samples.clear();
    }

    fn redraw(&mut self) -> Result<(), SinkError> {
        self.revision += 1;
        Ok(())
    }
}

/// Textual readout shown beside the schematic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub time: Scalar,
    pub displacement: Scalar,
    pub velocity: Scalar,
}

impl Readout {
    pub fn time_text(&self) -> String {
        format!("{:.2} s", self.time)
    }

    pub fn displacement_text(&self) -> String {
        format!("{:.2} m", self.displacement)
    }

    pub fn velocity_text(&self) -> String {
        format!("{:.2} m/s", self.velocity)
    }
}

impl From<&PhysicsState> for Readout {
    fn from(state: &PhysicsState) -> Self {
        Self {
            time: state.elapsed,
            displacement: state.displacement,
            velocity: state.velocity,
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {} | Displacement: {} | Velocity: {}",
            self.time_text(),
            self.displacement_text(),
            self.velocity_text()
        )
    }
}

/// Render sink that only logs the readout, for runs without a window
#[derive(Debug, Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn render(&mut self, state: &PhysicsState) -> Result<(), SinkError> {
        trace!("{}", Readout::from(state));
        Ok(())
    }
}
