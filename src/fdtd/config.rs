use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::fdtd::{EndTermination, SourceKind, StartTermination, VoltageSource};

/// Everything the integrator needs to know about the line and its networks.
///
/// Line values are totals for the whole line, not per unit length.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineConfiguration {
    pub source: VoltageSource,
    pub start_termination: StartTermination,
    pub end_termination: EndTermination,
    /// The length of each tick, in seconds.
    pub timestep: f64,
    /// The number of positions calculated along the line.
    pub segment_count: usize,
    pub resistance: f64,
    pub conductance: f64,
    pub inductance: f64,
    pub capacitance: f64,
}

impl Default for LineConfiguration {
    fn default() -> Self {
        Self {
            source: VoltageSource::step(5.0),
            start_termination: StartTermination::ClosedCircuit,
            end_termination: EndTermination::OpenCircuit,
            timestep: 1e-9,
            segment_count: 1000,
            resistance: 75.0,
            conductance: 1e-6,
            inductance: 175e-6,
            capacitance: 15e-9,
        }
    }
}

impl LineConfiguration {
    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes this configuration to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Checks that every value the update formulas use is usable.
    ///
    /// Values belonging to inactive networks are not part of the
    /// configuration, so they are never checked.
    pub fn validate(&self) -> Result<(), Error> {
        positive("timestep", self.timestep)?;
        if self.segment_count < 2 {
            return Err(Error::InvalidConfiguration {
                parameter: "segment count",
                value: self.segment_count as f64,
                reason: "must be at least 2",
            });
        }

        non_negative("line resistance", self.resistance)?;
        non_negative("line conductance", self.conductance)?;
        positive("line inductance", self.inductance)?;
        positive("line capacitance", self.capacitance)?;

        finite("source voltage", self.source.voltage)?;
        match self.source.kind {
            SourceKind::Step => {}
            SourceKind::Pulse => {
                positive("source period", self.source.period)?;
                non_negative("source pulse duration", self.source.pulse_duration)?;
            }
            SourceKind::Sine => positive("source period", self.source.period)?,
        }

        match self.start_termination {
            StartTermination::ClosedCircuit => {}
            StartTermination::Resistor { resistance } => {
                non_negative("start resistance", resistance)?;
            }
            StartTermination::Capacitor { capacitance } => {
                positive("start capacitance", capacitance)?;
            }
            StartTermination::Inductor { inductance } => {
                positive("start inductance", inductance)?;
            }
        }

        match self.end_termination {
            EndTermination::OpenCircuit | EndTermination::ClosedCircuit => {}
            EndTermination::Resistor { resistance } => positive("end resistance", resistance)?,
            EndTermination::Capacitor { capacitance } => {
                positive("end capacitance", capacitance)?;
            }
            EndTermination::Inductor { inductance } => positive("end inductance", inductance)?,
        }

        Ok(())
    }
}

fn finite(parameter: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration { parameter, value, reason: "must be finite" })
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), Error> {
    finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration { parameter, value, reason: "must be positive" })
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), Error> {
    finite(parameter, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration { parameter, value, reason: "must not be negative" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(LineConfiguration::default().validate().is_ok());
    }

    #[test]
    fn lossless_line_is_valid() {
        let config = LineConfiguration {
            resistance: 0.0,
            conductance: 0.0,
            ..LineConfiguration::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_line() {
        let cases = [
            LineConfiguration { timestep: 0.0, ..LineConfiguration::default() },
            LineConfiguration { segment_count: 1, ..LineConfiguration::default() },
            LineConfiguration { capacitance: 0.0, ..LineConfiguration::default() },
            LineConfiguration { inductance: -1.0, ..LineConfiguration::default() },
            LineConfiguration { resistance: f64::NAN, ..LineConfiguration::default() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration { .. })),
                "{config:?} should be rejected",
            );
        }
    }

    #[test]
    fn only_active_networks_are_checked() {
        let config = LineConfiguration {
            source: VoltageSource::step(1.0),
            end_termination: EndTermination::OpenCircuit,
            ..LineConfiguration::default()
        };
        assert!(config.validate().is_ok());

        let config = LineConfiguration {
            source: VoltageSource::sine(1.0, 0.0),
            ..LineConfiguration::default()
        };
        assert!(config.validate().is_err());

        let config = LineConfiguration {
            end_termination: EndTermination::Resistor { resistance: 0.0 },
            ..LineConfiguration::default()
        };
        assert!(config.validate().is_err());

        let config = LineConfiguration {
            start_termination: StartTermination::Resistor { resistance: 0.0 },
            ..LineConfiguration::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_uses_tagged_networks() {
        let config = LineConfiguration {
            end_termination: EndTermination::Capacitor { capacitance: 2e-9 },
            ..LineConfiguration::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains(r#""end_termination":{"type":"capacitor","capacitance":"#));
        assert!(text.contains(r#""kind":"step""#));

        let parsed: LineConfiguration = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
