//! WASM bindings for the line integrator.
//!
//! The exported names match what the browser front end calls, so the
//! integrator can be dropped in behind its existing simulator interface.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLineIntegrator } from 'telegrapher';
//!
//! await init();
//!
//! const sim = new WasmLineIntegrator();
//! sim.configureSimulator(1, 1, 1, 1, 1e-9, 1000, 75, 1e-6, 175e-6, 15e-9,
//!                        5, 1e-6, 1e-7, 0, 0, 0, 0, 0, 0);
//! sim.resetSimulation();
//! sim.stepSimulationMany(1000);
//! const voltages = sim.getVoltages();
//! ```

use wasm_bindgen::prelude::*;

use crate::fdtd::{
    EndTermination, LineConfiguration, LineIntegrator, SourceKind, StartTermination,
    VoltageSource,
};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: crate::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible line integrator.
#[wasm_bindgen]
pub struct WasmLineIntegrator {
    line: LineIntegrator,
}

impl Default for WasmLineIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmLineIntegrator {
    /// Creates an integrator with the default line.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLineIntegrator {
        WasmLineIntegrator { line: LineIntegrator::default() }
    }

    /// Replaces the whole configuration.
    ///
    /// The simulation type tag only knows `1` (basic). Source tags are
    /// 1 = step, 2 = pulse, 3 = sine; start termination tags are
    /// 1 = closed circuit, 2 = resistor, 3 = capacitor, 4 = inductor; end
    /// termination tags are 1 = open circuit, 2 = closed circuit,
    /// 3 = resistor, 4 = capacitor, 5 = inductor.
    #[wasm_bindgen(js_name = "configureSimulator")]
    #[allow(clippy::too_many_arguments)]
    pub fn configure_simulator(
        &mut self,
        simulation_type: u32,
        source_type: u32,
        start_termination_type: u32,
        end_termination_type: u32,
        timestep: f64,
        segments: usize,
        resistance: f64,
        conductance: f64,
        inductance: f64,
        capacitance: f64,
        source_voltage: f64,
        source_period: f64,
        source_pulse_duration: f64,
        start_resistance: f64,
        start_capacitance: f64,
        start_inductance: f64,
        end_resistance: f64,
        end_capacitance: f64,
        end_inductance: f64,
    ) -> Result<(), JsValue> {
        if simulation_type != 1 {
            return Err(to_js(crate::Error::UnknownVariant {
                kind: "simulation",
                tag: simulation_type,
            }));
        }

        let config = LineConfiguration {
            source: VoltageSource {
                kind: SourceKind::from_tag(source_type).map_err(to_js)?,
                voltage: source_voltage,
                period: source_period,
                pulse_duration: source_pulse_duration,
            },
            start_termination: StartTermination::from_tag(
                start_termination_type,
                start_resistance,
                start_capacitance,
                start_inductance,
            ).map_err(to_js)?,
            end_termination: EndTermination::from_tag(
                end_termination_type,
                end_resistance,
                end_capacitance,
                end_inductance,
            ).map_err(to_js)?,
            timestep,
            segment_count: segments,
            resistance,
            conductance,
            inductance,
            capacitance,
        };

        self.line.configure(config).map_err(to_js)
    }

    /// Resets the voltages, currents and current tick to zero.
    #[wasm_bindgen(js_name = "resetSimulation")]
    pub fn reset_simulation(&mut self) {
        self.line.reset();
    }

    /// Does a single step of the simulation.
    #[wasm_bindgen(js_name = "stepSimulation")]
    pub fn step_simulation(&mut self) {
        self.line.step();
    }

    /// Does `ticks` steps without crossing the JS boundary in between.
    #[wasm_bindgen(js_name = "stepSimulationMany")]
    pub fn step_simulation_many(&mut self, ticks: u32) {
        self.line.advance(u64::from(ticks));
    }

    #[wasm_bindgen(js_name = "getTick")]
    pub fn get_tick(&self) -> f64 {
        self.line.tick() as f64
    }

    #[wasm_bindgen(js_name = "getTime")]
    pub fn get_time(&self) -> f64 {
        self.line.time()
    }

    /// Copies out the voltages as a Float64Array.
    #[wasm_bindgen(js_name = "getVoltages")]
    pub fn get_voltages(&self) -> Vec<f64> {
        self.line.voltages().to_vec()
    }

    /// Copies out the currents as a Float64Array.
    #[wasm_bindgen(js_name = "getCurrents")]
    pub fn get_currents(&self) -> Vec<f64> {
        self.line.currents().to_vec()
    }
}
