//! Repeated Grover trials across a range of qubit counts.
//!
//! For each qubit count a single marked index is drawn, then many
//! independent trials run on a bounded rayon pool. Qubit counts are
//! processed one after another; a count's accuracy is only computed once
//! all of its trials have finished.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{Grover, Measurement};
use crate::error::Result;

/// Aggregate outcome of all trials for one qubit count.
#[derive(Clone, Debug, PartialEq)]
pub struct QubitAccuracy {
    pub nqubits: usize,
    /// Marked index shared by every trial.
    pub answer: usize,
    /// Grover iterations per trial.
    pub iterations: usize,
    pub trials: usize,
    /// Trials that measured the marked index.
    pub hits: usize,
    /// Trials whose sampling fell off the end of the distribution.
    pub unmeasured: usize,
    pub elapsed: Duration,
}

impl QubitAccuracy {
    /// Percentage of trials that found the marked index.
    pub fn accuracy(&self) -> f64 {
        self.hits as f64 / self.trials as f64 * 100.0
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Tally {
    hits: usize,
    unmeasured: usize,
}

impl Tally {
    fn record(mut self, m: Measurement, answer: usize) -> Self {
        match m {
            Measurement::Basis(i) if i == answer => self.hits += 1,
            Measurement::Basis(_) => {}
            Measurement::NoMeasurement => self.unmeasured += 1,
        }
        self
    }

    fn merge(self, other: Tally) -> Self {
        Tally {
            hits: self.hits + other.hits,
            unmeasured: self.unmeasured + other.unmeasured,
        }
    }
}

/// Pick the marked index for a qubit count.
///
/// Draws from `[1, 2^N - 2]`, keeping clear of the all-zeros and all-ones
/// states. A single qubit has no such interior, so both states are eligible.
pub fn choose_answer(nqubits: usize, rng: &mut impl Rng) -> usize {
    let n_states = 1usize << nqubits;
    if n_states > 2 {
        rng.gen_range(1..=n_states - 2)
    } else {
        rng.gen_range(0..n_states)
    }
}

// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for trial `trial` of qubit count `nqubits` in a run seeded with `seed`.
///
/// Depends only on its inputs, so a seeded run gives the same tallies no
/// matter how trials are scheduled across workers.
pub fn trial_seed(seed: u64, nqubits: usize, trial: usize) -> u64 {
    mix(mix(seed ^ nqubits as u64) ^ trial as u64)
}

/// Runs Grover trials for every qubit count in a [`Config`].
pub struct Sweep {
    config: Config,
    pool: ThreadPool,
}

impl Sweep {
    /// Validate `config` and start a pool of `config.concurrency` workers.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("grover-trial-{i}"))
            .build()?;
        debug!(workers = config.concurrency, "trial pool ready");
        Ok(Sweep { config, pool })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every trial for one qubit count and marked index.
    pub fn run_qubits(&self, nqubits: usize, answer: usize) -> Result<QubitAccuracy> {
        let grover = Grover::new(nqubits, answer)?.with_rounding(self.config.rounding);
        let trials = self.config.trials;
        debug!(
            nqubits,
            answer,
            iterations = grover.iterations(),
            trials,
            "running trials"
        );

        let t0 = Instant::now();
        let tally = self.pool.install(|| match self.config.seed {
            Some(seed) => (0..trials)
                .into_par_iter()
                .map(|i| {
                    let mut rng = StdRng::seed_from_u64(trial_seed(seed, nqubits, i));
                    grover.measure(&mut rng)
                })
                .fold(Tally::default, |t, m| t.record(m, answer))
                .reduce(Tally::default, Tally::merge),
            None => (0..trials)
                .into_par_iter()
                .map_init(rand::thread_rng, |rng, _| grover.measure(rng))
                .fold(Tally::default, |t, m| t.record(m, answer))
                .reduce(Tally::default, Tally::merge),
        });
        let elapsed = t0.elapsed();

        if tally.unmeasured > 0 {
            warn!(
                nqubits,
                unmeasured = tally.unmeasured,
                "some trials produced no measurement"
            );
        }

        let result = QubitAccuracy {
            nqubits,
            answer,
            iterations: grover.iterations(),
            trials,
            hits: tally.hits,
            unmeasured: tally.unmeasured,
            elapsed,
        };
        info!(
            nqubits,
            accuracy = result.accuracy(),
            elapsed = ?elapsed,
            "qubit count done"
        );
        Ok(result)
    }

    /// Sweep the configured qubit range, calling `each` as every count finishes.
    pub fn run_with(&self, mut each: impl FnMut(&QubitAccuracy)) -> Result<Vec<QubitAccuracy>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut results = Vec::with_capacity(self.config.qubit_range().count());
        for nqubits in self.config.qubit_range() {
            let answer = choose_answer(nqubits, &mut rng);
            let result = self.run_qubits(nqubits, answer)?;
            each(&result);
            results.push(result);
        }
        Ok(results)
    }

    /// Sweep the configured qubit range.
    pub fn run(&self) -> Result<Vec<QubitAccuracy>> {
        self.run_with(|_| {})
    }
}
