use ndarray::{s, ArrayView1, Zip};
use tracing::{debug, warn};

use crate::{ComputeDescriptor, Error, SimulationState, Solver};
use crate::fdtd::{
    LineConfiguration, StartTerminator, Terminator, UpdateCoefficients, VSource,
};

/// Advances the voltages and currents of a single line one tick at a time.
///
/// The integrator owns its state exclusively. Callers replace the
/// configuration with [`configure`](Self::configure) between ticks and read
/// the state back through views.
#[derive(Debug, Clone)]
pub struct LineIntegrator {
    config: LineConfiguration,
    coeffs: UpdateCoefficients,
    state: SimulationState,
}

impl Default for LineIntegrator {
    fn default() -> Self {
        let config = LineConfiguration::default();
        Self {
            coeffs: UpdateCoefficients::derive(&config),
            state: SimulationState::zeros(config.segment_count),
            config,
        }
    }
}

impl LineIntegrator {
    /// Creates an integrator with every voltage and current at zero.
    pub fn new(config: LineConfiguration) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            coeffs: UpdateCoefficients::derive(&config),
            state: SimulationState::zeros(config.segment_count),
            config,
        })
    }

    /// Creates an integrator that resumes from `state`.
    pub fn with_state(config: LineConfiguration, state: SimulationState) -> Result<Self, Error> {
        config.validate()?;

        let expected_length = config.segment_count;
        if state.voltages.len() != expected_length {
            return Err(Error::BadInit {
                array_name: "Voltage".to_string(),
                input_length: state.voltages.len(),
                expected_length,
            });
        }
        if state.currents.len() != expected_length {
            return Err(Error::BadInit {
                array_name: "Current".to_string(),
                input_length: state.currents.len(),
                expected_length,
            });
        }

        Ok(Self {
            coeffs: UpdateCoefficients::derive(&config),
            state,
            config,
        })
    }

    /// Replaces the configuration and rederives the update coefficients.
    ///
    /// The tick count is kept. When the segment count changes, existing
    /// values are kept up to the shorter length and new positions start at
    /// zero. A rejected configuration leaves the integrator untouched.
    pub fn configure(&mut self, config: LineConfiguration) -> Result<(), Error> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected line configuration");
            return Err(err);
        }

        if config.segment_count != self.state.len() {
            debug!(
                from = self.state.len(),
                to = config.segment_count,
                "resizing line state",
            );
            self.state.resize(config.segment_count);
        }
        self.coeffs = UpdateCoefficients::derive(&config);
        self.config = config;

        debug!(
            source = ?self.config.source.kind,
            start = ?self.config.start_termination,
            end = ?self.config.end_termination,
            k1 = self.coeffs.k1,
            k2 = self.coeffs.k2,
            k3 = self.coeffs.k3,
            k4 = self.coeffs.k4,
            "configured line",
        );
        Ok(())
    }

    /// Zeroes the tick count, voltages and currents.
    pub fn reset(&mut self) {
        self.state.clear();
        debug!(points = self.state.len(), "reset line state");
    }

    /// Advances the line by one tick.
    pub fn step(&mut self) {
        let npoints = self.config.segment_count;
        let delta_t = self.config.timestep;
        let coeffs = self.coeffs;
        let start = self.config.start_termination;
        let end = self.config.end_termination;
        // the source is sampled at the time the tick starts
        let source_volt = self.config.source.generate(self.time());

        let SimulationState { tick, voltages, currents } = &mut self.state;

        // interior voltages, from currents of the previous tick
        Zip::from(voltages.slice_mut(s![1..(npoints - 1)]))
            .and(currents.slice(s![..(npoints - 1)]).windows(2))
            .for_each(|v, lc| {
                *v = coeffs.k1 * (lc[1] - lc[0]) + coeffs.k2 * *v;
            });

        let first_volt = start.next_voltage(
            source_volt,
            voltages.slice(s![..2]),
            currents[0],
            delta_t,
        );
        voltages[0] = first_volt;
        voltages[npoints - 1] = end.next_voltage(
            voltages[npoints - 1],
            currents[npoints - 2],
            delta_t,
        );

        // currents, from the voltages just written
        Zip::from(currents.slice_mut(s![..(npoints - 1)]))
            .and(voltages.windows(2))
            .for_each(|i, lv| {
                *i = coeffs.k3 * (lv[1] - lv[0]) + coeffs.k4 * *i;
            });

        let last_curr = end.next_current(
            voltages[npoints - 1],
            currents.slice(s![(npoints - 2)..]),
            &coeffs,
            delta_t,
        );
        currents[npoints - 1] = last_curr;
        currents[0] = start.next_current(
            source_volt,
            voltages.slice(s![..2]),
            currents[0],
            delta_t,
        );

        *tick += 1;
    }

    /// Runs `ticks` consecutive steps.
    pub fn advance(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// The number of ticks since construction or the last reset.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    /// Elapsed simulated time, the tick count times the current timestep.
    #[inline]
    pub fn time(&self) -> f64 {
        self.state.tick as f64 * self.config.timestep
    }

    #[inline]
    pub fn voltages(&self) -> ArrayView1<f64> {
        self.state.voltages.view()
    }

    #[inline]
    pub fn currents(&self) -> ArrayView1<f64> {
        self.state.currents.view()
    }

    /// The source output at the current time.
    #[inline]
    pub fn source_voltage(&self) -> f64 {
        self.config.source.generate(self.time())
    }

    #[inline]
    pub fn configuration(&self) -> &LineConfiguration {
        &self.config
    }

    #[inline]
    pub fn coefficients(&self) -> &UpdateCoefficients {
        &self.coeffs
    }

    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }
}

impl Solver for LineIntegrator {
    fn compute(
        &mut self,
        desc: ComputeDescriptor,
    ) -> Result<(ndarray::Array2<f64>, ndarray::Array2<f64>), Error> {
        let interval = desc.record_interval.max(1);
        let first_tick = self.tick();
        let nrecords = if desc.record {
            ((first_tick + desc.nsteps) / interval - first_tick / interval) as usize
        } else {
            0
        };
        let npoints = self.npoints();

        // create storage arrays for voltage and current
        let mut voltages = ndarray::Array2::<f64>::zeros((nrecords, npoints));
        let mut currents = ndarray::Array2::<f64>::zeros((nrecords, npoints));

        let mut row = 0;
        for _ in 0..desc.nsteps {
            self.step();

            if desc.record && self.tick() % interval == 0 {
                voltages.row_mut(row).assign(&self.state.voltages);
                currents.row_mut(row).assign(&self.state.currents);
                row += 1;
            }

            if let Some(ref bar) = desc.bar {
                bar.inc(1)
            }
        }

        Ok((voltages, currents))
    }

    #[inline]
    fn npoints(&self) -> usize {
        self.config.segment_count
    }

    #[inline]
    fn delta_t(&self) -> f64 {
        self.config.timestep
    }

    #[inline]
    fn tick(&self) -> u64 {
        self.state.tick
    }
}
