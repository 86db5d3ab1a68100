// PyO3 Python bindings for rgrover
//
// - Grover(nqubits, answer, rounding) search object
// - sweep() running the full accuracy sweep on the Rust thread pool
// - iteration_count() helper

use crate::config::{Config, default_concurrency};
use crate::engine::{Grover as RustGrover, Measurement, Rounding};
use crate::error::GroverError;
use crate::trials::Sweep;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn to_py_err(e: GroverError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_rounding(rounding: &str) -> PyResult<Rounding> {
    rounding
        .parse()
        .map_err(|e: crate::error::ConfigError| PyValueError::new_err(e.to_string()))
}

/// Python wrapper for a Grover search problem
#[pyclass(name = "Grover")]
pub struct PyGrover {
    inner: RustGrover,
}

#[pymethods]
impl PyGrover {
    #[new]
    #[pyo3(signature = (nqubits, answer, rounding="nearest"))]
    fn new(nqubits: usize, answer: usize, rounding: &str) -> PyResult<Self> {
        let inner = RustGrover::new(nqubits, answer)
            .map_err(to_py_err)?
            .with_rounding(parse_rounding(rounding)?);
        Ok(PyGrover { inner })
    }

    // ---- Properties ----

    #[getter]
    fn nqubits(&self) -> usize {
        self.inner.nqubits()
    }

    #[getter]
    fn answer(&self) -> usize {
        self.inner.answer()
    }

    /// Size of the search space
    #[getter]
    fn n_states(&self) -> usize {
        self.inner.n_states()
    }

    /// Grover iterations per trial
    #[getter]
    fn iterations(&self) -> usize {
        self.inner.iterations()
    }

    fn __repr__(&self) -> String {
        format!(
            "Grover(nqubits={}, answer={}, rounding='{}')",
            self.inner.nqubits(),
            self.inner.answer(),
            self.inner.rounding()
        )
    }

    // ---- Simulation ----

    /// Final amplitudes after all iterations
    fn amplitudes(&self) -> Vec<f64> {
        self.inner.evolve().to_vec()
    }

    /// Normalized outcome probabilities
    fn distribution(&self) -> Vec<f64> {
        self.inner.distribution().to_vec()
    }

    /// Probability of measuring the marked state
    fn success_probability(&self) -> f64 {
        self.inner.success_probability()
    }

    /// Measure with a fixed draw u in [0, 1); None if sampling fell short
    fn measure_at(&self, u: f64) -> Option<usize> {
        match self.inner.measure_at(u) {
            Measurement::Basis(i) => Some(i),
            Measurement::NoMeasurement => None,
        }
    }

    /// Run `count` sequential trials and return the number of hits
    #[pyo3(signature = (count, seed=None))]
    fn trials(&self, count: usize, seed: Option<u64>) -> usize {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..count).filter(|_| self.inner.trial(&mut rng)).count()
    }
}

/// Run the accuracy sweep and return a list of (nqubits, accuracy percent)
#[pyfunction]
#[pyo3(signature = (min_qubits, max_qubits, trials=1000, concurrency=None, rounding="nearest", seed=None))]
fn sweep(
    py: Python<'_>,
    min_qubits: usize,
    max_qubits: usize,
    trials: usize,
    concurrency: Option<usize>,
    rounding: &str,
    seed: Option<u64>,
) -> PyResult<Vec<(usize, f64)>> {
    let config = Config {
        min_qubits,
        max_qubits,
        trials,
        concurrency: concurrency.unwrap_or_else(default_concurrency),
        rounding: parse_rounding(rounding)?,
        seed,
        ..Config::default()
    };
    let results = py
        .allow_threads(|| Sweep::new(config)?.run())
        .map_err(to_py_err)?;
    Ok(results.iter().map(|r| (r.nqubits, r.accuracy())).collect())
}

/// Optimal Grover iteration count for a space of n_states
#[pyfunction]
#[pyo3(signature = (n_states, rounding="nearest"))]
fn iteration_count(n_states: usize, rounding: &str) -> PyResult<usize> {
    Ok(crate::engine::iteration_count(n_states, parse_rounding(rounding)?))
}

/// Python module definition
#[pymodule]
fn rgrover(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGrover>()?;
    m.add_function(wrap_pyfunction!(sweep, m)?)?;
    m.add_function(wrap_pyfunction!(iteration_count, m)?)?;
    Ok(())
}
