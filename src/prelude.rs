//! Includes commonly used library components.

pub use crate::{
    ComputeDescriptor,
    Error,
    RunDescriptor,
    SaveSettings,
    SaveType,
    Simulation,
    SimulationDescriptor,
    SimulationState,
    Solver,
};
pub use crate::fdtd::{
    EndTermination,
    LineConfiguration,
    LineIntegrator,
    SourceKind,
    StartTermination,
    UpdateCoefficients,
    VoltageSource,
};
