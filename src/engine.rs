//! Grover search on a dense real state vector.
//!
//! A [`Grover`] instance describes one search problem (qubit count, marked
//! index, rounding policy). Each call to [`Grover::trial`] builds its own
//! vectors, runs the Oracle/Diffusion iterations, and measures once with the
//! caller's random source.

use std::f64::consts::FRAC_PI_4;
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use rand::Rng;
use tracing::debug;

use crate::error::{ConfigError, GroverError, Result};
use crate::ops::{diffusion, oracle};

/// Largest supported register. Each trial holds three vectors of 2^N `f64`.
pub const MAX_QUBITS: usize = 20;

/// How the optimal iteration count `pi/4 * sqrt(2^N)` is turned into an integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Round to the nearest integer.
    #[default]
    Nearest,
    /// Drop the fractional part.
    Truncate,
}

impl FromStr for Rounding {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "round" => Ok(Rounding::Nearest),
            "truncate" | "floor" => Ok(Rounding::Truncate),
            _ => Err(ConfigError::Rounding(s.to_string())),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rounding::Nearest => write!(f, "nearest"),
            Rounding::Truncate => write!(f, "truncate"),
        }
    }
}

/// Result of sampling the final state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Measurement {
    /// The basis state that was observed.
    Basis(usize),
    /// The cumulative distribution never reached the draw. Only happens
    /// through floating-point rounding with a draw very close to 1, and is
    /// counted as a failed search.
    NoMeasurement,
}

impl Measurement {
    /// True if this measurement observed `answer`.
    pub fn is(&self, answer: usize) -> bool {
        matches!(self, Measurement::Basis(i) if *i == answer)
    }
}

// ---- Stages ----

/// Number of Grover iterations for a space of `n_states` basis states.
pub fn iteration_count(n_states: usize, rounding: Rounding) -> usize {
    let k = FRAC_PI_4 * (n_states as f64).sqrt();
    match rounding {
        Rounding::Nearest => k.round() as usize,
        Rounding::Truncate => k.trunc() as usize,
    }
}

/// Equal superposition over `n_states` basis states.
pub fn uniform_state(n_states: usize) -> Array1<f64> {
    Array1::from_elem(n_states, 1.0 / (n_states as f64).sqrt())
}

/// One-hot vector selecting `answer`.
pub fn marked_state(n_states: usize, answer: usize) -> Array1<f64> {
    let mut marked = Array1::zeros(n_states);
    marked[answer] = 1.0;
    marked
}

/// Squared amplitudes, rescaled so they sum to exactly one.
pub fn probabilities(state: &Array1<f64>) -> Array1<f64> {
    let probs = state.mapv(|a| a * a);
    let total = probs.sum();
    probs / total
}

/// Running sum of a probability distribution.
pub fn cumulative(probs: &Array1<f64>) -> Array1<f64> {
    probs
        .iter()
        .scan(0.0, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

/// First index whose cumulative probability reaches `u`.
pub fn sample_index(cum: &Array1<f64>, u: f64) -> Option<usize> {
    cum.iter().position(|&c| c >= u)
}

// ---- Search Problem ----

/// A Grover search over `2^nqubits` states for one marked index.
#[derive(Clone, Debug)]
pub struct Grover {
    nqubits: usize,
    answer: usize,
    rounding: Rounding,
}

impl Grover {
    /// Describe a search with the default (nearest) rounding policy.
    pub fn new(nqubits: usize, answer: usize) -> Result<Self> {
        if nqubits < 1 {
            return Err(GroverError::InvalidQubitCount(nqubits));
        }
        if nqubits > MAX_QUBITS {
            return Err(GroverError::TooManyQubits(nqubits));
        }
        let n_states = 1usize << nqubits;
        if answer >= n_states {
            return Err(GroverError::AnswerOutOfRange { answer, n_states });
        }
        Ok(Grover {
            nqubits,
            answer,
            rounding: Rounding::default(),
        })
    }

    /// Override how the iteration count is rounded.
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn nqubits(&self) -> usize {
        self.nqubits
    }

    pub fn answer(&self) -> usize {
        self.answer
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Size of the search space, `2^nqubits`.
    pub fn n_states(&self) -> usize {
        1 << self.nqubits
    }

    /// Number of Oracle/Diffusion rounds this search performs.
    pub fn iterations(&self) -> usize {
        iteration_count(self.n_states(), self.rounding)
    }

    /// Run every Grover iteration from the uniform state and return the
    /// final amplitudes.
    pub fn evolve(&self) -> Array1<f64> {
        let n_states = self.n_states();
        let uniform = uniform_state(n_states);
        let marked = marked_state(n_states, self.answer);

        let mut state = uniform.clone();
        for _ in 0..self.iterations() {
            state = oracle(&state, &marked);
            state = diffusion(&state, &uniform);
            debug_assert!(
                (crate::ops::norm(&state) - 1.0).abs() < 1e-6,
                "Grover iteration lost normalization"
            );
        }
        state
    }

    /// Normalized outcome distribution after the search.
    pub fn distribution(&self) -> Array1<f64> {
        probabilities(&self.evolve())
    }

    /// Probability of observing the marked state.
    pub fn success_probability(&self) -> f64 {
        self.distribution()[self.answer]
    }

    /// Run the search and measure with a fixed draw `u` in [0, 1).
    pub fn measure_at(&self, u: f64) -> Measurement {
        let cum = cumulative(&self.distribution());
        match sample_index(&cum, u) {
            Some(i) => Measurement::Basis(i),
            None => {
                debug!(
                    u,
                    last = cum.iter().next_back().copied().unwrap_or(0.0),
                    "cumulative distribution fell short of the draw"
                );
                Measurement::NoMeasurement
            }
        }
    }

    /// Run the search and measure once.
    pub fn measure(&self, rng: &mut impl Rng) -> Measurement {
        let u: f64 = rng.r#gen();
        self.measure_at(u)
    }

    /// One full trial: true if the measurement found the marked state.
    pub fn trial(&self, rng: &mut impl Rng) -> bool {
        self.measure(rng).is(self.answer)
    }
}
