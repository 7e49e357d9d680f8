pub mod components;

mod coefficients;
mod config;
mod integrator;

pub use coefficients::UpdateCoefficients;
pub use components::{EndTermination, SourceKind, StartTermination, VoltageSource};
pub use config::LineConfiguration;
pub use integrator::LineIntegrator;

/// Generates the driving voltage at the start of a transmission line.
pub trait VSource {
    /// The source output after `time` seconds of simulated time.
    fn generate(&self, time: f64) -> f64;
}

/// Handles start of line boundary conditions, the network between the
/// source and the first line node.
pub trait StartTerminator {
    /// The first node voltage, applied right after the interior voltage pass.
    ///
    /// `volts` holds the first two node voltages.
    fn next_voltage(
        &self,
        source_volt: f64,
        volts: ndarray::ArrayView1<f64>,
        first_curr: f64,
        delta_t: f64,
    ) -> f64;

    /// The first current, applied after the end current condition.
    fn next_current(
        &self,
        source_volt: f64,
        volts: ndarray::ArrayView1<f64>,
        first_curr: f64,
        delta_t: f64,
    ) -> f64;
}

/// Handles end of line boundary conditions, representing a physical terminator.
pub trait Terminator {
    /// The last node voltage, applied before the current pass.
    fn next_voltage(&self, last_volt: f64, last_line_curr: f64, delta_t: f64) -> f64;

    /// The boundary current slot, applied after the current pass.
    ///
    /// `currs` holds the last line current and the boundary current slot.
    fn next_current(
        &self,
        last_volt: f64,
        currs: ndarray::ArrayView1<f64>,
        coeffs: &UpdateCoefficients,
        delta_t: f64,
    ) -> f64;
}
