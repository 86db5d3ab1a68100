//! Run configuration for a Grover accuracy sweep.

use std::ops::RangeInclusive;

use crate::engine::{MAX_QUBITS, Rounding};
use crate::error::ConfigError;

/// Settings for one sweep over a range of qubit counts.
///
/// Built once at startup and never changed while the sweep runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Smallest register to simulate.
    pub min_qubits: usize,
    /// Largest register to simulate.
    pub max_qubits: usize,
    /// Trials per qubit count.
    pub trials: usize,
    /// Maximum number of trials in flight at once.
    pub concurrency: usize,
    pub rounding: Rounding,
    /// Fixed seed for a reproducible run; `None` draws from system entropy.
    pub seed: Option<u64>,
    /// Decimal places in the accuracy column.
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_qubits: 1,
            max_qubits: 10,
            trials: 1000,
            concurrency: default_concurrency(),
            rounding: Rounding::default(),
            seed: None,
            decimals: 2,
        }
    }
}

impl Config {
    /// Check every field before any simulation work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_qubits < 1 {
            return Err(ConfigError::MinQubits(self.min_qubits));
        }
        if self.max_qubits < self.min_qubits {
            return Err(ConfigError::EmptyRange {
                min: self.min_qubits,
                max: self.max_qubits,
            });
        }
        if self.max_qubits > MAX_QUBITS {
            return Err(ConfigError::MaxQubits(self.max_qubits));
        }
        if self.trials < 1 {
            return Err(ConfigError::Trials(self.trials));
        }
        if self.concurrency < 1 {
            return Err(ConfigError::Concurrency(self.concurrency));
        }
        if self.decimals > 10 {
            return Err(ConfigError::Decimals(self.decimals));
        }
        Ok(())
    }

    /// Qubit counts visited by the sweep, in order.
    pub fn qubit_range(&self) -> RangeInclusive<usize> {
        self.min_qubits..=self.max_qubits
    }
}

/// One worker per available processing unit, or one if that is unknown.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_min() {
        let c = Config { min_qubits: 0, ..Config::default() };
        assert_eq!(c.validate(), Err(ConfigError::MinQubits(0)));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let c = Config { min_qubits: 5, max_qubits: 3, ..Config::default() };
        assert_eq!(c.validate(), Err(ConfigError::EmptyRange { min: 5, max: 3 }));
    }

    #[test]
    fn test_rejects_oversized_register() {
        let c = Config { max_qubits: MAX_QUBITS + 1, ..Config::default() };
        assert_eq!(c.validate(), Err(ConfigError::MaxQubits(MAX_QUBITS + 1)));
    }

    #[test]
    fn test_rejects_zero_trials_and_workers() {
        let c = Config { trials: 0, ..Config::default() };
        assert_eq!(c.validate(), Err(ConfigError::Trials(0)));
        let c = Config { concurrency: 0, ..Config::default() };
        assert_eq!(c.validate(), Err(ConfigError::Concurrency(0)));
    }

    #[test]
    fn test_qubit_range() {
        let c = Config { min_qubits: 2, max_qubits: 4, ..Config::default() };
        assert_eq!(c.qubit_range().collect::<Vec<_>>(), vec![2, 3, 4]);
    }
}
