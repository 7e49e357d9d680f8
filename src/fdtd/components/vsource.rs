use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::fdtd::VSource;

/// The waveform a `VoltageSource` produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Constant output from t = 0.
    Step,
    /// A periodic rectangular pulse train.
    Pulse,
    /// A sinusoid whose half period is `period`.
    Sine,
}

impl SourceKind {
    /// Decodes the host protocol tag (1 = Step, 2 = Pulse, 3 = Sine).
    pub fn from_tag(tag: u32) -> Result<Self, Error> {
        match tag {
            1 => Ok(Self::Step),
            2 => Ok(Self::Pulse),
            3 => Ok(Self::Sine),
            _ => Err(Error::UnknownVariant { kind: "source", tag }),
        }
    }
}

/// The driving source at the start of the line.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoltageSource {
    pub kind: SourceKind,
    /// Peak output voltage.
    pub voltage: f64,
    /// Pulse repetition period, or the half period of a sine source.
    pub period: f64,
    /// How long each pulse stays high.
    pub pulse_duration: f64,
}

impl VoltageSource {
    #[inline]
    pub fn step(voltage: f64) -> Self {
        Self { kind: SourceKind::Step, voltage, period: 0.0, pulse_duration: 0.0 }
    }

    #[inline]
    pub fn pulse(voltage: f64, period: f64, pulse_duration: f64) -> Self {
        Self { kind: SourceKind::Pulse, voltage, period, pulse_duration }
    }

    #[inline]
    pub fn sine(voltage: f64, period: f64) -> Self {
        Self { kind: SourceKind::Sine, voltage, period, pulse_duration: 0.0 }
    }
}

impl VSource for VoltageSource {
    #[inline]
    fn generate(&self, time: f64) -> f64 {
        match self.kind {
            SourceKind::Step => self.voltage,
            SourceKind::Pulse => {
                if time % self.period < self.pulse_duration {
                    self.voltage
                } else {
                    0.0
                }
            }
            // the voltage waveform repeats every 2 * period
            SourceKind::Sine => self.voltage * f64::sin(time / self.period * PI),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn step_is_constant() {
        let source = VoltageSource::step(5.0);
        for t in [0.0, 1e-9, 3.7e-6, 1.0] {
            assert_eq!(source.generate(t), 5.0);
        }
    }

    #[test]
    fn pulse_is_high_for_duration_of_each_period() {
        let source = VoltageSource::pulse(2.0, 10.0, 3.0);
        assert_eq!(source.generate(0.0), 2.0);
        assert_eq!(source.generate(2.5), 2.0);
        assert_eq!(source.generate(3.0), 0.0);
        assert_eq!(source.generate(9.9), 0.0);
        assert_eq!(source.generate(11.0), 2.0);
        assert_eq!(source.generate(14.0), 0.0);
    }

    #[test]
    fn sine_period_is_twice_configured_period() {
        let source = VoltageSource::sine(3.0, 4.0);
        assert_relative_eq!(source.generate(0.0), 0.0);
        assert_relative_eq!(source.generate(2.0), 3.0);
        assert_relative_eq!(source.generate(6.0), -3.0, epsilon = 1e-12);
        assert_relative_eq!(source.generate(8.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(SourceKind::from_tag(2).unwrap(), SourceKind::Pulse);
        assert!(matches!(
            SourceKind::from_tag(4),
            Err(Error::UnknownVariant { kind: "source", tag: 4 })
        ));
    }
}
