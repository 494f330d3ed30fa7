//! Phase readout from measured outcomes.

use serde::Serialize;

use crate::error::ExecutionError;
use crate::execution::OutcomeHistogram;

/// Point estimate derived from a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEstimate {
    /// `measured_value / 2^precision`.
    pub phase: f64,
    /// Fraction of shots that landed on `measured_value`.
    pub confidence: f64,
    /// The mode of the histogram.
    pub measured_value: u64,
}

/// A single ranked outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Counting register value.
    pub value: u64,
    /// The phase that value encodes.
    pub phase: f64,
    /// Observed frequency.
    pub probability: f64,
}

/// The phase encoded by register `value` at `precision` bits.
pub fn value_to_phase(value: u64, precision: u32) -> f64 {
    // Both operands are exact in f64 for precision up to 52 bits.
    value as f64 / f64::from(precision).exp2()
}

/// Estimate the phase as the histogram's mode read as a binary fraction.
pub fn estimate_phase(histogram: &OutcomeHistogram) -> Result<PhaseEstimate, ExecutionError> {
    let (value, count) = histogram.mode().ok_or(ExecutionError::EmptyHistogram)?;
    Ok(PhaseEstimate {
        phase: value_to_phase(value, histogram.precision()),
        confidence: count as f64 / histogram.total() as f64,
        measured_value: value,
    })
}

/// The `n` most frequent outcomes, ties broken by smaller value.
pub fn top_outcomes(histogram: &OutcomeHistogram, n: usize) -> Vec<Outcome> {
    let total = histogram.total() as f64;
    histogram
        .ranked()
        .into_iter()
        .take(n)
        .map(|(value, count)| Outcome {
            value,
            phase: value_to_phase(value, histogram.precision()),
            probability: count as f64 / total,
        })
        .collect()
}

/// Distance between two phases on the unit circle, in [0, 0.5].
pub fn phase_error(estimate: f64, truth: f64) -> f64 {
    let d = (estimate - truth).rem_euclid(1.0);
    d.min(1.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_from_mode() {
        let hist = OutcomeHistogram::from_values(4, [(4, 90), (5, 6), (3, 4)]).unwrap();
        let est = estimate_phase(&hist).unwrap();
        assert_eq!(est.phase, 0.25);
        assert_eq!(est.measured_value, 4);
        assert_eq!(est.confidence, 0.9);
    }

    #[test]
    fn test_single_shot_confidence_is_one() {
        let hist = OutcomeHistogram::from_values(3, [(7, 1)]).unwrap();
        let est = estimate_phase(&hist).unwrap();
        assert_eq!(est.phase, 0.875);
        assert_eq!(est.confidence, 1.0);
    }

    #[test]
    fn test_bitstrings_read_most_significant_first() {
        let phase_of = |bitstring: &str| {
            let mut counts = qpe_hal::Counts::new();
            counts.insert(bitstring, 1);
            let hist = OutcomeHistogram::from_counts(4, &counts).unwrap();
            estimate_phase(&hist).unwrap().phase
        };
        // "0010" is 2/16; its mirror "0100" is 4/16.
        assert_eq!(phase_of("0010"), 0.125);
        assert_eq!(phase_of("0100"), 0.25);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = OutcomeHistogram::from_values(3, []).unwrap();
        assert!(matches!(
            estimate_phase(&hist),
            Err(ExecutionError::EmptyHistogram)
        ));
    }

    #[test]
    fn test_top_outcomes() {
        let hist = OutcomeHistogram::from_values(2, [(0, 1), (1, 2), (3, 2)]).unwrap();
        let top = top_outcomes(&hist, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].value, 1);
        assert_eq!(top[0].phase, 0.25);
        assert_eq!(top[0].probability, 0.4);
        assert_eq!(top[1].value, 3);
        assert_eq!(top_outcomes(&hist, 10).len(), 3);
    }

    #[test]
    fn test_phase_error_wraps() {
        assert_eq!(phase_error(0.25, 0.25), 0.0);
        assert!((phase_error(0.9375, 0.0) - 0.0625).abs() < 1e-15);
        assert!((phase_error(0.0, 0.9375) - 0.0625).abs() < 1e-15);
        assert!((phase_error(0.3125, 0.3) - 0.0125).abs() < 1e-12);
    }
}
