use crate::fdtd::LineConfiguration;

/// Trapezoidal update coefficients for the voltage (`k1`, `k2`) and current
/// (`k3`, `k4`) passes.
///
/// They discretize `C dV/dt = -dI/dx - G V` and `L dI/dt = -dV/dx - R I`
/// using the total line values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UpdateCoefficients {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub k4: f64,
}

impl UpdateCoefficients {
    /// Derives the coefficients from a configuration.
    #[inline]
    pub fn derive(config: &LineConfiguration) -> Self {
        let dt = config.timestep;
        let r = config.resistance;
        let g = config.conductance;
        let l = config.inductance;
        let c = config.capacitance;

        Self {
            k1: (-2.0 * dt) / (dt * g + 2.0 * c),
            k2: (2.0 * c - dt * g) / (2.0 * c + dt * g),
            k3: (-2.0 * dt) / (dt * r + 2.0 * l),
            k4: (2.0 * l - dt * r) / (2.0 * l + dt * r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lossless_line_keeps_previous_values() {
        let config = LineConfiguration {
            resistance: 0.0,
            conductance: 0.0,
            inductance: 175e-6,
            capacitance: 15e-9,
            timestep: 1e-9,
            ..LineConfiguration::default()
        };
        let coeffs = UpdateCoefficients::derive(&config);

        assert_eq!(coeffs.k2, 1.0);
        assert_eq!(coeffs.k4, 1.0);
        assert_relative_eq!(coeffs.k1, -1e-9 / 15e-9, max_relative = 1e-12);
        assert_relative_eq!(coeffs.k3, -1e-9 / 175e-6, max_relative = 1e-12);
    }

    #[test]
    fn losses_damp_previous_values() {
        let config = LineConfiguration::default();
        let coeffs = UpdateCoefficients::derive(&config);

        assert!(coeffs.k2 < 1.0 && coeffs.k2 > 0.0);
        assert!(coeffs.k4 < 1.0 && coeffs.k4 > 0.0);
        assert!(coeffs.k1 < 0.0);
        assert!(coeffs.k3 < 0.0);
        assert_relative_eq!(
            coeffs.k4,
            (2.0 * 175e-6 - 1e-9 * 75.0) / (2.0 * 175e-6 + 1e-9 * 75.0)
        );
    }
}
