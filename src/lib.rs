// rgrover - Grover search simulator in Rust
//
// Simulates Grover's algorithm on a real-valued state vector and measures
// how often a single measurement finds the marked state.

pub mod config;
pub mod engine;
pub mod error;
pub mod ops;
pub mod report;
pub mod trials;

pub use config::Config;
pub use engine::{Grover, MAX_QUBITS, Measurement, Rounding, iteration_count};
pub use error::{ConfigError, GroverError, Result};
pub use report::Report;
pub use trials::{QubitAccuracy, Sweep};

// ---- Python Bindings ----

#[cfg(feature = "pyo3")]
mod python;
