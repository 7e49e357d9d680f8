//! An FDTD integrator for the telegrapher's equations on a single lossy
//! transmission line, driven by a configurable source and terminated by
//! configurable networks at both ends.
//!
//! The core is [`fdtd::LineIntegrator`]: configure it once, call `step` as
//! often as needed, and read the tick, time, voltages and currents back
//! between steps. [`Simulation`] wraps any [`Solver`] for longer runs with
//! progress reporting and, with the `hdf5` feature, recording to file.
//!
//! To get started, refer to the `demos` directory in the main repository.

mod simulation;

pub mod fdtd;
pub mod prelude;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use simulation::{
    RunDescriptor, SaveSettings, SaveType, Simulation, SimulationDescriptor, SimulationState,
};

/// Represents an error in the simulation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid {parameter} ({value}): {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Unknown {kind} tag {tag}")]
    UnknownVariant { kind: &'static str, tag: u32 },
    #[error("Init {array_name} array does not have expected length \
        ( {array_name} array length: {input_length}, \
        expected length: {expected_length} )")]
    BadInit {
        array_name: String,
        input_length: usize,
        expected_length: usize,
    },
    #[error("Recording to file requires the `hdf5` feature")]
    RecordingUnavailable,
    #[error("Cannot append to save file {filename}: {reason}")]
    BadSaveFile {
        filename: String,
        reason: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "hdf5")]
    #[error(transparent)]
    H5Error(#[from] hdf5::Error),
}

/// Advances line state and reports samples of it.
pub trait Solver {
    /// Runs `desc.nsteps` ticks and returns the voltage and current rows
    /// sampled every `desc.record_interval` ticks. Both arrays have no rows
    /// when `desc.record` is false.
    fn compute(
        &mut self,
        desc: ComputeDescriptor,
    ) -> Result<(ndarray::Array2<f64>, ndarray::Array2<f64>), Error>;

    fn npoints(&self) -> usize;
    fn delta_t(&self) -> f64;
    fn tick(&self) -> u64;
}

/// Describes how a `Solver` should do computations.
pub struct ComputeDescriptor<'a> {
    pub nsteps: u64,
    pub record_interval: u64,
    /// Whether to sample the line at all.
    pub record: bool,
    pub bar: &'a Option<indicatif::ProgressBar>,
}
