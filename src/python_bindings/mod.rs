//! Python bindings that hand space-time traces to notebook code via PyO3.
//!
//! Each call returns the trace as a list of rows (`-1` for empty cells),
//! ready for `numpy.asarray` and `imshow`.
use pyo3::{exceptions::PyValueError, prelude::*, types::PyModule};

use crate::{
    BoundaryKind, CarCount, Cell, InjectionPolicy, SimulationConfig, SimulationError, Simulator,
    SlowZone, Velocity,
};

fn to_py_err(err: SimulationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python-facing handle on one running lane.
#[pyclass]
#[derive(Debug)]
pub struct PyTrafficLane {
    simulator: Simulator,
}

#[pymethods]
impl PyTrafficLane {
    #[new]
    #[pyo3(signature = (
        boundary = String::from("circular"),
        cells = 100,
        v_max = 5,
        p = 0.5,
        density = 0.15,
        inflow = None,
        bn_start = None,
        bn_end = None,
        v_max_bn = 1,
        t0 = 0,
        random_state = 0,
        initial_state = None,
    ))]
    /// Build a lane. `inflow=None` on a bottleneck fills every free entry cell.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        boundary: String,
        cells: usize,
        v_max: Velocity,
        p: f64,
        density: f64,
        inflow: Option<f64>,
        bn_start: Option<usize>,
        bn_end: Option<usize>,
        v_max_bn: Velocity,
        t0: usize,
        random_state: u64,
        initial_state: Option<Vec<Cell>>,
    ) -> PyResult<Self> {
        let kind: BoundaryKind = boundary.parse().map_err(to_py_err)?;
        let mut config = match kind {
            BoundaryKind::Circular => {
                SimulationConfig::circular(cells, v_max, p, CarCount::Density(density))
            }
            BoundaryKind::Bottleneck => {
                let injection = inflow.map_or(InjectionPolicy::Always, InjectionPolicy::Probability);
                let config = SimulationConfig::bottleneck(cells, v_max, p, injection);
                match SlowZone::from_bounds(bn_start, bn_end, v_max_bn).map_err(to_py_err)? {
                    Some(zone) => config.with_slow_zone(zone),
                    None => config,
                }
            }
        };
        config = config.with_seed(random_state).with_warmup(t0);
        if let Some(cells) = initial_state {
            config = config.with_initial_state(cells);
        }

        let simulator = Simulator::new(config).map_err(to_py_err)?;
        Ok(Self { simulator })
    }

    /// Current lane as a list of cells.
    pub fn state(&self) -> Vec<Cell> {
        self.simulator.lane().cells().to_vec()
    }

    /// Record `n_steps` steps; returns `n_steps + 1` rows starting at the
    /// current state.
    pub fn simulate(&mut self, n_steps: usize) -> PyResult<Vec<Vec<Cell>>> {
        let trace = self.simulator.run(n_steps).map_err(to_py_err)?;
        Ok(trace.rows())
    }
}

/// One-shot helper: build a lane and return its full trace.
#[pyfunction]
#[pyo3(signature = (boundary, cells, steps, v_max = 5, p = 0.5, density = 0.15, inflow = None, random_state = 0))]
#[allow(clippy::too_many_arguments)]
pub fn space_time(
    boundary: String,
    cells: usize,
    steps: usize,
    v_max: Velocity,
    p: f64,
    density: f64,
    inflow: Option<f64>,
    random_state: u64,
) -> PyResult<Vec<Vec<Cell>>> {
    let mut lane = PyTrafficLane::new(
        boundary,
        cells,
        v_max,
        p,
        density,
        inflow,
        None,
        None,
        1,
        0,
        random_state,
        None,
    )?;
    lane.simulate(steps)
}

/// Create Python module.
#[pymodule]
pub fn nasch_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTrafficLane>()?;
    m.add_function(wrap_pyfunction!(space_time, m)?)?;
    Ok(())
}
