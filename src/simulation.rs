use std::cmp::min;
use std::mem::size_of;
use std::path::Path;

use tracing::info;

use crate::{ComputeDescriptor, Error, Solver};

/// Upper bound, in bytes, on the voltage and current rows sampled per chunk.
const CHUNK_BYTES: usize = 512 * 1024 * 1024;

/// Describes the transmission line state at the current tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    /// The number of ticks advanced so far.
    pub tick: u64,
    /// The voltages of each point along the transmission line, start first.
    pub voltages: ndarray::Array1<f64>,
    /// The currents between each point and the next; the last slot holds
    /// the end boundary current.
    pub currents: ndarray::Array1<f64>,
}

impl SimulationState {
    /// A state with `npoints` positions and everything at zero.
    pub fn zeros(npoints: usize) -> Self {
        Self {
            tick: 0,
            voltages: ndarray::Array1::<f64>::zeros(npoints),
            currents: ndarray::Array1::<f64>::zeros(npoints),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voltages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }

    /// Changes the number of positions, keeping values from the start of the
    /// line and zero filling any new positions at the end.
    pub fn resize(&mut self, npoints: usize) {
        let keep = min(self.len(), npoints);

        let mut voltages = ndarray::Array1::<f64>::zeros(npoints);
        voltages.slice_mut(ndarray::s![..keep]).assign(&self.voltages.slice(ndarray::s![..keep]));
        let mut currents = ndarray::Array1::<f64>::zeros(npoints);
        currents.slice_mut(ndarray::s![..keep]).assign(&self.currents.slice(ndarray::s![..keep]));

        self.voltages = voltages;
        self.currents = currents;
        assert_eq!(
            self.voltages.len(),
            self.currents.len(),
            "voltage and current arrays out of step",
        );
    }

    /// Zeroes the tick and every voltage and current.
    pub fn clear(&mut self) {
        self.tick = 0;
        self.voltages.fill(0.0);
        self.currents.fill(0.0);
    }
}

/// Describes a simulation.
pub struct SimulationDescriptor<S: Solver> {
    /// The `Solver` for the simulation.
    pub solver: S,
}

/// Describes a simulation run.
pub struct RunDescriptor<P: AsRef<Path>> {
    /// How long, in temperal units, the simulation should run.
    pub time_duration: f64,
    /// Run exactly this many ticks instead, ignoring `time_duration`.
    pub ticks: Option<u64>,
    /// Sample the line every this many ticks.
    pub record_interval: u64,
    /// Whether or not to print information to the console.
    pub verbose: bool,
    /// What, if any, information to save to file.
    pub save_settings: Option<SaveSettings<P>>,
}

/// How data should be saved to file.
#[derive(Debug)]
pub struct SaveSettings<P: AsRef<Path>> {
    /// The path to the save file.
    pub filename: P,
    /// What information to save.
    pub save_type: SaveType,
    /// Whether or not to overwrite any possible saved data.
    ///
    /// When appending with `SaveType::Full` to a file recorded with
    /// `SaveType::End`, the full datasets are created on the spot and the
    /// rows recorded before them stay zero.
    pub overwrite: bool,
}

/// Represents what data to save.
#[derive(PartialEq, Debug)]
pub enum SaveType {
    /// Save voltage and current data for every point on the line.
    Full,
    /// Save voltage and current data for only the end points.
    End,
}

/// Runs a `Solver` for long stretches of simulated time.
pub struct Simulation<S: Solver> {
    solver: S,
}

impl<S: Solver> Simulation<S> {
    /// Creates a new `Simulation` instance.
    #[inline]
    pub fn new(desc: SimulationDescriptor<S>) -> Self {
        Self { solver: desc.solver }
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Access to the solver, e.g. to reconfigure it between runs.
    #[inline]
    pub fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }

    /// The number of ticks a run of `time_duration` takes.
    #[inline]
    pub fn nsteps(&self, time_duration: f64) -> u64 {
        (time_duration / self.solver.delta_t()).ceil().max(0.0) as u64
    }

    /// Does a computational run.
    pub fn run<P: AsRef<Path>>(&mut self, desc: RunDescriptor<P>) -> Result<(), Error> {
        let nsteps = match desc.ticks {
            Some(ticks) => ticks,
            None => self.nsteps(desc.time_duration),
        };
        let interval = desc.record_interval.max(1);
        let total_points = self.solver.npoints();
        let record = desc.save_settings.is_some();
        // bound the memory held by each chunk of samples
        let record_bytes = 2 * total_points * size_of::<f64>();
        let chunk_records = ((CHUNK_BYTES / record_bytes.max(1)) as u64).max(1);
        let chunk_steps = if record {
            chunk_records.saturating_mul(interval)
        } else {
            nsteps.max(1)
        };

        info!(nsteps, record_interval = interval, points = total_points, "starting run");

        #[cfg(feature = "hdf5")]
        let mut recorder = match desc.save_settings {
            Some(ref settings) => Some(Recorder::open(
                settings,
                total_points,
                self.solver.delta_t(),
                interval,
                nsteps / interval,
            )?),
            None => None,
        };
        #[cfg(not(feature = "hdf5"))]
        if desc.save_settings.is_some() {
            return Err(Error::RecordingUnavailable);
        }

        // setup output if verbose
        let bar = if desc.verbose {
            println!("# of time steps: {}", nsteps);
            Some(indicatif::ProgressBar::new(nsteps))
        } else {
            None
        };

        // separate calculations into sets of time steps per loop
        let mut done = 0;
        while done < nsteps {
            let niters = min(chunk_steps, nsteps - done);
            let first_tick = self.solver.tick();

            // do calculations
            let (voltages, currents) = self.solver.compute(ComputeDescriptor {
                nsteps: niters,
                record_interval: interval,
                record,
                bar: &bar,
            })?;

            #[cfg(feature = "hdf5")]
            if let Some(ref mut recorder) = recorder {
                recorder.write(first_tick, interval, &voltages, &currents)?;
            }
            #[cfg(not(feature = "hdf5"))]
            let _ = (first_tick, voltages, currents);

            done += niters;
        }

        #[cfg(feature = "hdf5")]
        if let Some(recorder) = recorder {
            recorder.finish()?;
        }

        if let Some(ref bar) = bar {
            bar.finish();
        }
        info!(tick = self.solver.tick(), "finished run");

        Ok(())
    }
}

/// Creates the `full` group with room for `rows` rows of every point.
#[cfg(feature = "hdf5")]
fn create_full(file: &hdf5::File, rows: usize, total_points: usize) -> Result<(), Error> {
    let full_group = file.create_group("full")?;
    full_group.new_dataset::<f64>()
        .shape((hdf5::Extent::resizable(rows), total_points))
        .create("voltages")?;
    full_group.new_dataset::<f64>()
        .shape((hdf5::Extent::resizable(rows), total_points))
        .create("currents")?;
    Ok(())
}

/// Appends sampled rows to an HDF5 file.
#[cfg(feature = "hdf5")]
struct Recorder {
    file: hdf5::File,
    full: bool,
    offset: usize,
    total_points: usize,
}

#[cfg(feature = "hdf5")]
impl Recorder {
    fn open<P: AsRef<Path>>(
        settings: &SaveSettings<P>,
        total_points: usize,
        delta_t: f64,
        record_interval: u64,
        expected_records: u64,
    ) -> Result<Self, Error> {
        let SaveSettings { ref filename, ref save_type, overwrite } = *settings;
        let filename = filename.as_ref();
        let full = *save_type == SaveType::Full;

        if filename.exists() && !overwrite {
            let file = hdf5::File::append(filename)?;
            let offset = file.dataset("ticks")?.shape()[0];
            if full && file.group("full").is_err() {
                create_full(&file, offset.max(1), total_points)?;
            }
            return Ok(Self { file, full, offset, total_points });
        }

        let file = hdf5::File::create(filename)?;
        let initial = expected_records.max(1) as usize;

        // create end datasets
        file.new_dataset::<u64>()
            .shape(hdf5::Extent::resizable(initial))
            .create("ticks")?;
        for name in ["start", "end"] {
            let group = file.create_group(name)?;
            group.new_dataset::<f64>()
                .shape(hdf5::Extent::resizable(initial))
                .create("voltages")?;
            group.new_dataset::<f64>()
                .shape(hdf5::Extent::resizable(initial))
                .create("currents")?;
        }

        if full {
            create_full(&file, initial, total_points)?;
        }

        // save run settings as file attributes
        file.new_attr::<f64>()
            .shape(hdf5::Extents::Scalar)
            .create("time_step")?
            .write_scalar(&delta_t)?;
        file.new_attr::<u64>()
            .shape(hdf5::Extents::Scalar)
            .create("record_interval")?
            .write_scalar(&record_interval)?;

        Ok(Self { file, full, offset: 0, total_points })
    }

    fn write(
        &mut self,
        first_tick: u64,
        interval: u64,
        voltages: &ndarray::Array2<f64>,
        currents: &ndarray::Array2<f64>,
    ) -> Result<(), Error> {
        let nrecords = voltages.nrows();
        if nrecords == 0 {
            return Ok(());
        }
        let start = self.offset;
        let end = start + nrecords;

        let first_record = first_tick / interval + 1;
        let ticks: ndarray::Array1<u64> = (0..nrecords as u64)
            .map(|n| (first_record + n) * interval)
            .collect();
        let ticks_set = self.file.dataset("ticks")?;
        ticks_set.resize(end)?;
        ticks_set.write_slice(ticks.view(), ndarray::s![start..end])?;

        // save end point data
        for (group, column) in [("start", 0), ("end", self.total_points - 1)] {
            let volt_set = self.file.dataset(&format!("{group}/voltages"))?;
            volt_set.resize(end)?;
            volt_set.write_slice(
                voltages.column(column).to_owned().view(),
                ndarray::s![start..end],
            )?;
            let curr_set = self.file.dataset(&format!("{group}/currents"))?;
            curr_set.resize(end)?;
            curr_set.write_slice(
                currents.column(column).to_owned().view(),
                ndarray::s![start..end],
            )?;
        }

        // optionally save full data
        if self.full {
            let volt_set = self.file.dataset("full/voltages")?;
            volt_set.resize((end, self.total_points))?;
            volt_set.write_slice(voltages.view(), ndarray::s![start..end, ..])?;
            let curr_set = self.file.dataset("full/currents")?;
            curr_set.resize((end, self.total_points))?;
            curr_set.write_slice(currents.view(), ndarray::s![start..end, ..])?;
        }

        self.offset = end;
        Ok(())
    }

    /// Trims every dataset to the rows actually written.
    fn finish(self) -> Result<(), Error> {
        let rows = self.offset;
        for name in ["ticks", "start/voltages", "start/currents", "end/voltages", "end/currents"] {
            self.file.dataset(name)?.resize(rows)?;
        }
        if self.full {
            for name in ["full/voltages", "full/currents"] {
                self.file.dataset(name)?.resize((rows, self.total_points))?;
            }
        }
        self.file.close()?;
        Ok(())
    }
}
