use serde::{Deserialize, Serialize};

use crate::Error;
use crate::fdtd::{Terminator, UpdateCoefficients};

/// The network connected across the end of the line.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndTermination {
    OpenCircuit,
    /// A short to ground past the last node.
    ClosedCircuit,
    /// A load resistor, in ohms.
    Resistor { resistance: f64 },
    /// A load capacitor, in farads.
    Capacitor { capacitance: f64 },
    /// A load inductor, in henries.
    Inductor { inductance: f64 },
}

impl EndTermination {
    /// Decodes the host protocol tag (1 = open circuit, 2 = closed circuit,
    /// 3 = resistor, 4 = capacitor, 5 = inductor), attaching the matching
    /// component value.
    pub fn from_tag(
        tag: u32,
        resistance: f64,
        capacitance: f64,
        inductance: f64,
    ) -> Result<Self, Error> {
        match tag {
            1 => Ok(Self::OpenCircuit),
            2 => Ok(Self::ClosedCircuit),
            3 => Ok(Self::Resistor { resistance }),
            4 => Ok(Self::Capacitor { capacitance }),
            5 => Ok(Self::Inductor { inductance }),
            _ => Err(Error::UnknownVariant { kind: "end termination", tag }),
        }
    }
}

impl Terminator for EndTermination {
    #[inline]
    fn next_voltage(&self, last_volt: f64, last_line_curr: f64, delta_t: f64) -> f64 {
        match *self {
            Self::Capacitor { capacitance } => last_volt + last_line_curr * delta_t / capacitance,
            Self::OpenCircuit
            | Self::ClosedCircuit
            | Self::Resistor { .. }
            | Self::Inductor { .. } => last_volt,
        }
    }

    #[inline]
    fn next_current(
        &self,
        last_volt: f64,
        currs: ndarray::ArrayView1<f64>,
        coeffs: &UpdateCoefficients,
        delta_t: f64,
    ) -> f64 {
        match *self {
            Self::OpenCircuit => 0.0,
            Self::ClosedCircuit => coeffs.k3 * (-last_volt) + coeffs.k4 * currs[1],
            Self::Resistor { resistance } => last_volt / resistance,
            // graph fix: the load itself was applied in `next_voltage`
            Self::Capacitor { .. } => currs[0],
            Self::Inductor { inductance } => currs[1] + last_volt * delta_t / inductance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn coeffs() -> UpdateCoefficients {
        UpdateCoefficients { k1: -1.0, k2: 1.0, k3: -0.5, k4: 0.9 }
    }

    #[test]
    fn open_circuit_carries_no_current() {
        let currs = array![0.4, 0.7];
        let i = EndTermination::OpenCircuit.next_current(3.0, currs.view(), &coeffs(), 1e-9);
        assert_eq!(i, 0.0);
    }

    #[test]
    fn closed_circuit_shorts_past_last_node() {
        let currs = array![0.4, 0.2];
        let i = EndTermination::ClosedCircuit.next_current(2.0, currs.view(), &coeffs(), 1e-9);
        assert_relative_eq!(i, 1.18, epsilon = 1e-12);
    }

    #[test]
    fn resistor_follows_ohms_law() {
        let term = EndTermination::Resistor { resistance: 50.0 };
        let currs = array![0.0, 0.0];
        assert_relative_eq!(term.next_current(5.0, currs.view(), &coeffs(), 1e-9), 0.1);
        assert_eq!(term.next_voltage(5.0, 1.0, 1e-9), 5.0);
    }

    #[test]
    fn capacitor_charges_from_last_line_current() {
        let term = EndTermination::Capacitor { capacitance: 1e-6 };
        assert_relative_eq!(term.next_voltage(1.0, 2.0, 1e-6), 3.0, epsilon = 1e-12);
        let currs = array![0.25, 9.0];
        assert_eq!(term.next_current(3.0, currs.view(), &coeffs(), 1e-6), 0.25);
    }

    #[test]
    fn inductor_integrates_last_voltage() {
        let term = EndTermination::Inductor { inductance: 1e-3 };
        let currs = array![0.0, 0.5];
        let i = term.next_current(2.0, currs.view(), &coeffs(), 1e-6);
        assert_relative_eq!(i, 0.502, epsilon = 1e-12);
    }

    #[test]
    fn tags_carry_matching_value() {
        let term = EndTermination::from_tag(5, 10.0, 2e-9, 1e-6).unwrap();
        assert_eq!(term, EndTermination::Inductor { inductance: 1e-6 });
        assert!(matches!(
            EndTermination::from_tag(6, 0.0, 0.0, 0.0),
            Err(Error::UnknownVariant { tag: 6, .. })
        ));
    }
}
