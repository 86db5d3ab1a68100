//! Error types for the Grover simulator.

use thiserror::Error;

use crate::engine::MAX_QUBITS;

/// Errors produced while building or running a Grover simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroverError {
    /// A register needs at least one qubit.
    #[error("qubit count must be at least 1, got {0}")]
    InvalidQubitCount(usize),

    /// State size grows as 2^N; beyond this the simulation is impractical.
    #[error("qubit count {0} exceeds the supported maximum of {max}", max = MAX_QUBITS)]
    TooManyQubits(usize),

    /// The marked index does not name a basis state.
    #[error("marked index {answer} is outside [0, {n_states}) for this register")]
    AnswerOutOfRange {
        /// The offending marked index.
        answer: usize,
        /// Number of basis states in the register.
        n_states: usize,
    },

    /// Configuration was rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("failed to build trial worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Invalid run configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("minimum qubit count must be at least 1, got {0}")]
    MinQubits(usize),

    #[error("maximum qubit count {max} is below the minimum {min}")]
    EmptyRange { min: usize, max: usize },

    #[error("maximum qubit count {0} exceeds the supported maximum of {max}", max = MAX_QUBITS)]
    MaxQubits(usize),

    #[error("trial count must be at least 1, got {0}")]
    Trials(usize),

    #[error("concurrency limit must be at least 1, got {0}")]
    Concurrency(usize),

    #[error("at most 10 decimal places can be reported, got {0}")]
    Decimals(usize),

    #[error("unknown rounding mode '{0}' (expected 'nearest' or 'truncate')")]
    Rounding(String),
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, GroverError>;
