//! Backend execution and outcome translation.
//!
//! The backend reports counts keyed by classical bitstrings. This module
//! turns them into an [`OutcomeHistogram`] keyed by counting-register value,
//! rejecting anything that does not describe exactly `shots` readouts of a
//! `precision`-bit register.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use qpe_hal::{Backend, Counts, HalError};
use qpe_ir::Circuit;

use crate::error::ExecutionError;

/// Observed counts per counting-register value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeHistogram {
    precision: u32,
    counts: BTreeMap<u64, u64>,
}

impl OutcomeHistogram {
    /// Build a histogram from `(value, count)` pairs.
    ///
    /// Repeated values accumulate; zero counts are dropped.
    pub fn from_values<I>(precision: u32, values: I) -> Result<Self, ExecutionError>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut counts = BTreeMap::new();
        for (value, count) in values {
            if value.checked_shr(precision).unwrap_or(0) != 0 {
                return Err(ExecutionError::ValueOutOfRange { value, precision });
            }
            if count > 0 {
                *counts.entry(value).or_insert(0) += count;
            }
        }
        Ok(Self { precision, counts })
    }

    /// Parse backend counts keyed by most-significant-bit-first bitstrings.
    pub fn from_counts(precision: u32, counts: &Counts) -> Result<Self, ExecutionError> {
        let mut values = Vec::with_capacity(counts.len());
        for (bitstring, count) in counts.iter() {
            if bitstring.len() != precision as usize {
                return Err(ExecutionError::WidthMismatch {
                    bitstring: bitstring.to_string(),
                    expected: precision,
                    actual: bitstring.len(),
                });
            }
            let value = parse_bitstring(bitstring).ok_or_else(|| {
                ExecutionError::InvalidBitstring {
                    bitstring: bitstring.to_string(),
                }
            })?;
            values.push((value, count));
        }
        Self::from_values(precision, values)
    }

    /// Counting register width.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Observations of `value`.
    pub fn get(&self, value: u64) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Number of distinct values observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(v, c)| (*v, *c))
    }

    /// The most frequent value; ties go to the smallest value.
    pub fn mode(&self) -> Option<(u64, u64)> {
        self.iter().fold(None, |best, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
    }

    /// Values ordered by descending count, then ascending value.
    pub fn ranked(&self) -> Vec<(u64, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|(va, ca), (vb, cb)| cb.cmp(ca).then(va.cmp(vb)));
        ranked
    }

    /// The underlying ordered map.
    pub fn as_map(&self) -> &BTreeMap<u64, u64> {
        &self.counts
    }
}

fn parse_bitstring(bits: &str) -> Option<u64> {
    if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u64::from_str_radix(bits, 2).ok()
}

/// Run `circuit` once on `backend` and translate its counts.
///
/// The circuit is checked against the backend's advertised capabilities
/// first; a mismatch is reported without calling the backend.
#[instrument(skip(backend, circuit), fields(backend = backend.name(), circuit = circuit.name()))]
pub async fn execute(
    backend: &dyn Backend,
    circuit: &Circuit,
    precision: u32,
    shots: u32,
) -> Result<OutcomeHistogram, ExecutionError> {
    let violations = backend.capabilities().violations(circuit, shots);
    if !violations.is_empty() {
        return Err(HalError::CircuitTooLarge(violations.join("; ")).into());
    }

    let result = backend.run(circuit, shots).await?;
    debug!(
        outcomes = result.counts.len(),
        elapsed_ms = result.execution_time_ms,
        "backend run finished"
    );

    if result.counts.is_empty() {
        return Err(ExecutionError::EmptyHistogram);
    }
    let histogram = OutcomeHistogram::from_counts(precision, &result.counts)?;
    for actual in [histogram.total(), u64::from(result.shots)] {
        if actual != u64::from(shots) {
            return Err(ExecutionError::ShotMismatch {
                expected: u64::from(shots),
                actual,
            });
        }
    }
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Counts {
        let mut counts = Counts::new();
        for (k, v) in pairs {
            counts.insert(*k, *v);
        }
        counts
    }

    #[test]
    fn test_from_counts_reads_msb_first() {
        let hist = OutcomeHistogram::from_counts(3, &counts(&[("100", 7), ("001", 3)])).unwrap();
        assert_eq!(hist.get(4), 7);
        assert_eq!(hist.get(1), 3);
        assert_eq!(hist.total(), 10);
        assert_eq!(hist.iter().collect::<Vec<_>>(), vec![(1, 3), (4, 7)]);
    }

    #[test]
    fn test_from_counts_rejects_malformed() {
        assert!(matches!(
            OutcomeHistogram::from_counts(3, &counts(&[("10", 1)])),
            Err(ExecutionError::WidthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert!(matches!(
            OutcomeHistogram::from_counts(3, &counts(&[("1x0", 1)])),
            Err(ExecutionError::InvalidBitstring { .. })
        ));
        assert!(matches!(
            OutcomeHistogram::from_counts(3, &counts(&[("+10", 1)])),
            Err(ExecutionError::InvalidBitstring { .. })
        ));
    }

    #[test]
    fn test_from_values_range_check() {
        assert!(matches!(
            OutcomeHistogram::from_values(2, [(4, 1)]),
            Err(ExecutionError::ValueOutOfRange {
                value: 4,
                precision: 2
            })
        ));
        let hist = OutcomeHistogram::from_values(2, [(3, 1), (3, 2), (0, 0)]).unwrap();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.get(3), 3);
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        let hist = OutcomeHistogram::from_values(3, [(6, 5), (2, 5), (1, 4)]).unwrap();
        assert_eq!(hist.mode(), Some((2, 5)));
        assert_eq!(hist.ranked(), vec![(2, 5), (6, 5), (1, 4)]);

        let empty = OutcomeHistogram::from_values(3, []).unwrap();
        assert_eq!(empty.mode(), None);
    }
}
