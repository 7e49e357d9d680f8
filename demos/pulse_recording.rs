use telegrapher::prelude::*;

fn main() {
    std::fs::create_dir_all("data").unwrap();

    let config = LineConfiguration {
        source: VoltageSource::pulse(5.0, 20e-6, 2e-6),
        start_termination: StartTermination::ClosedCircuit,
        end_termination: EndTermination::Resistor { resistance: 75.0 },
        segment_count: 500,
        ..LineConfiguration::default()
    };

    let mut simulation = Simulation::new(SimulationDescriptor {
        solver: LineIntegrator::new(config).unwrap(),
    });

    println!("-- Run Part 1 --");
    // let the pulse train settle and save end data
    simulation.run(RunDescriptor {
        time_duration: 1e-4, // [s]
        ticks: None,
        record_interval: 100,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/pulse_line.h5",
            save_type: SaveType::End,
            overwrite: true,
        }),
    })
    .unwrap();

    println!("-- Run Part 2 --");
    // swap the load for a capacitor and keep appending
    let config = LineConfiguration {
        end_termination: EndTermination::Capacitor { capacitance: 1e-9 },
        ..config
    };
    simulation.solver_mut().configure(config).unwrap();
    simulation.run(RunDescriptor {
        time_duration: 1e-4,
        ticks: None,
        record_interval: 100,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/pulse_line.h5",
            save_type: SaveType::End,
            overwrite: false,
        }),
    })
    .unwrap();
}
