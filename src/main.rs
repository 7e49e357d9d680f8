//! Telegrapher - transmission line FDTD runner
//!
//! Steps a configured line and reports it every few ticks, the way the
//! interactive plot refreshes.
//!
//! # Usage
//!
//! ```bash
//! telegrapher --dump-default > line.json
//! telegrapher line.json --ticks 100000 --every 1000
//! telegrapher line.json --ticks 100000 --every 100 --output line.h5 --full
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use telegrapher::prelude::*;

/// Transmission line simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON line configuration; the default line when omitted
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 100_000)]
    ticks: u64,

    /// Report (or record) the line every this many ticks
    #[arg(short, long, default_value_t = 1000)]
    every: u64,

    /// Record samples to this HDF5 file instead of printing them
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Record every point of the line, not just the end points
    #[arg(long)]
    full: bool,

    /// Append to an existing output file
    #[arg(long)]
    append: bool,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    dump_default: bool,

    /// Show a progress bar while recording
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.dump_default {
        println!("{}", serde_json::to_string_pretty(&LineConfiguration::default())?);
        return Ok(());
    }

    let config = match args.config {
        Some(ref path) => LineConfiguration::from_json_file(path)?,
        None => LineConfiguration::default(),
    };
    let mut line = LineIntegrator::new(config)?;
    line.reset();

    match args.output {
        Some(filename) => {
            let mut simulation = Simulation::new(SimulationDescriptor { solver: line });
            simulation.run(RunDescriptor {
                time_duration: 0.0,
                ticks: Some(args.ticks),
                record_interval: args.every,
                verbose: args.verbose,
                save_settings: Some(SaveSettings {
                    filename,
                    save_type: if args.full { SaveType::Full } else { SaveType::End },
                    overwrite: !args.append,
                }),
            })?;
        }
        None => report(&mut line, args.ticks, args.every.max(1)),
    }

    Ok(())
}

/// Prints the source, both end voltages and the largest voltage seen so far.
fn report(line: &mut LineIntegrator, ticks: u64, every: u64) {
    let mut peak: f64 = 0.0;

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "tick", "time [s]", "source [V]", "start [V]", "end [V]", "peak [V]",
    );
    let mut done = 0;
    while done < ticks {
        let batch = every.min(ticks - done);
        line.advance(batch);
        done += batch;

        let voltages = line.voltages();
        peak = voltages.iter().fold(peak, |acc, v| acc.max(v.abs()));
        println!(
            "{:>10} {:>12.4e} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            line.tick(),
            line.time(),
            line.source_voltage(),
            voltages[0],
            voltages[voltages.len() - 1],
            peak,
        );
    }
}
