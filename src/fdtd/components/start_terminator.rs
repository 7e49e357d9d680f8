use serde::{Deserialize, Serialize};

use crate::Error;
use crate::fdtd::StartTerminator;

/// The network between the source and the start of the line.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StartTermination {
    /// The source drives the first node directly.
    ClosedCircuit,
    /// A series resistor, in ohms.
    Resistor { resistance: f64 },
    /// A series capacitor, in farads.
    Capacitor { capacitance: f64 },
    /// A series inductor, in henries.
    Inductor { inductance: f64 },
}

impl StartTermination {
    /// Decodes the host protocol tag (1 = closed circuit, 2 = resistor,
    /// 3 = capacitor, 4 = inductor), attaching the matching component value.
    pub fn from_tag(
        tag: u32,
        resistance: f64,
        capacitance: f64,
        inductance: f64,
    ) -> Result<Self, Error> {
        match tag {
            1 => Ok(Self::ClosedCircuit),
            2 => Ok(Self::Resistor { resistance }),
            3 => Ok(Self::Capacitor { capacitance }),
            4 => Ok(Self::Inductor { inductance }),
            _ => Err(Error::UnknownVariant { kind: "start termination", tag }),
        }
    }
}

impl StartTerminator for StartTermination {
    #[inline]
    fn next_voltage(
        &self,
        source_volt: f64,
        volts: ndarray::ArrayView1<f64>,
        first_curr: f64,
        delta_t: f64,
    ) -> f64 {
        match *self {
            Self::ClosedCircuit => source_volt,
            Self::Resistor { resistance } => source_volt - first_curr * resistance,
            // the source terms cancel; left unsimplified so results stay bit-identical
            Self::Capacitor { capacitance } => {
                source_volt + (volts[0] - source_volt) - first_curr * delta_t / capacitance
            }
            // graph fix: the inductor acts through the first current instead
            Self::Inductor { .. } => volts[1],
        }
    }

    #[inline]
    fn next_current(
        &self,
        source_volt: f64,
        volts: ndarray::ArrayView1<f64>,
        first_curr: f64,
        delta_t: f64,
    ) -> f64 {
        match *self {
            Self::Inductor { inductance } => {
                first_curr + (source_volt - volts[1]) * delta_t / inductance
            }
            Self::ClosedCircuit | Self::Resistor { .. } | Self::Capacitor { .. } => first_curr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn closed_circuit_follows_source() {
        let volts = array![1.0, 2.0];
        let v = StartTermination::ClosedCircuit.next_voltage(5.0, volts.view(), 0.3, 1e-9);
        assert_eq!(v, 5.0);
    }

    #[test]
    fn resistor_drops_source_by_first_current() {
        let term = StartTermination::Resistor { resistance: 50.0 };
        let volts = array![0.0, 0.0];
        assert_relative_eq!(term.next_voltage(5.0, volts.view(), 0.02, 1e-9), 4.0, epsilon = 1e-12);
        assert_eq!(term.next_current(5.0, volts.view(), 0.02, 1e-9), 0.02);
    }

    #[test]
    fn capacitor_integrates_first_current() {
        let term = StartTermination::Capacitor { capacitance: 1e-6 };
        let volts = array![2.0, 0.0];
        let v = term.next_voltage(5.0, volts.view(), 1.0, 1e-6);
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inductor_copies_neighbour_and_drives_current() {
        let term = StartTermination::Inductor { inductance: 1e-3 };
        let volts = array![0.0, 1.5];
        assert_eq!(term.next_voltage(5.0, volts.view(), 0.0, 1e-6), 1.5);
        let i = term.next_current(5.0, volts.view(), 0.1, 1e-6);
        assert_relative_eq!(i, 0.1 + 3.5e-3, epsilon = 1e-12);
    }

    #[test]
    fn tags_carry_matching_value() {
        let term = StartTermination::from_tag(3, 10.0, 2e-9, 1e-6).unwrap();
        assert_eq!(term, StartTermination::Capacitor { capacitance: 2e-9 });
        assert!(StartTermination::from_tag(0, 0.0, 0.0, 0.0).is_err());
        assert!(StartTermination::from_tag(5, 0.0, 0.0, 0.0).is_err());
    }
}
