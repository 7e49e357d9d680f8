use telegrapher::prelude::*;

fn main() {
    let capacitance = 15e-9; // [F]
    let inductance = 175e-6; // [H]
    let resistance = 0.0; // [Ω]
    let conductance = 0.0; // [S]

    let segment_count = 200;

    // a lossless line driven through a matched resistor into an open end
    let impedance = f64::sqrt(inductance / capacitance);
    let mut line = LineIntegrator::new(LineConfiguration {
        source: VoltageSource::step(5.0),
        start_termination: StartTermination::Resistor { resistance: impedance },
        end_termination: EndTermination::OpenCircuit,
        timestep: 1e-9, // [s]
        segment_count,
        resistance,
        conductance,
        inductance,
        capacitance,
    })
    .unwrap();

    let coeffs = line.coefficients();
    println!(
        "\n-- General Simulation Info --\n\
        # of points:  {}\n\
        Δt:           {:<9.2e} s\n\
        k1..k4:       {:.3e} {:.3e} {:.3e} {:.3e}\n",
        segment_count,
        line.configuration().timestep,
        coeffs.k1,
        coeffs.k2,
        coeffs.k3,
        coeffs.k4,
    );

    // watch the step travel down the line and reflect from the open end
    line.reset();
    for _ in 0..20 {
        line.advance(1000);
        let voltages = line.voltages();
        let front = voltages.iter().rposition(|v| v.abs() > 1e-3).unwrap_or(0);
        println!(
            "tick {:>6}  start {:>8.4} V  end {:>8.4} V  front at {:>3}",
            line.tick(),
            voltages[0],
            voltages[segment_count - 1],
            front,
        );
    }

    // switch to a sine source mid-run; the tick count carries on
    let config = LineConfiguration {
        source: VoltageSource::sine(5.0, 5e-6),
        ..*line.configuration()
    };
    line.configure(config).unwrap();
    line.advance(10_000);
    println!("after switching to sine: t = {:.3e} s, source = {:.4} V", line.time(), line.source_voltage());
}
