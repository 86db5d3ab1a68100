//! Text report of sweep results.

use std::fmt;
use std::time::Duration;

use crate::trials::QubitAccuracy;

/// Column header printed above the per-qubit lines.
pub const HEADER: &str = "Qubits | Accuracy";

/// Format one result as `<N> | <accuracy>%`.
pub fn accuracy_line(result: &QubitAccuracy, decimals: usize) -> String {
    format!("{} | {:.*}%", result.nqubits, decimals, result.accuracy())
}

/// Full report: header, one line per qubit count, optional elapsed time.
pub struct Report<'a> {
    pub results: &'a [QubitAccuracy],
    pub decimals: usize,
    pub elapsed: Option<Duration>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for r in self.results {
            writeln!(f, "{}", accuracy_line(r, self.decimals))?;
        }
        if let Some(elapsed) = self.elapsed {
            writeln!(f, "Elapsed: {elapsed:.2?}")?;
        }
        Ok(())
    }
}
