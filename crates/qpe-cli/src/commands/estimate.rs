//! Estimate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qpe_core::estimator::top_outcomes;
use qpe_core::{Outcome, OutcomeHistogram, PhaseEstimationResult};

use super::common::{RequestArgs, create_backend, create_engine};

/// Execute the estimate command.
pub async fn execute(
    config: Option<&Path>,
    request: &RequestArgs,
    backend: &str,
    seed: Option<u64>,
    format: &str,
) -> Result<()> {
    let engine = create_engine(config)?;
    let raw = request.to_raw()?;
    let backend_impl = create_backend(backend, seed)?;
    let json = format == "json";

    if !json {
        println!(
            "{} Estimating phase {} of {} with {} counting qubits on {}",
            style("→").cyan().bold(),
            style(raw.angle).green(),
            style(&raw.unitary_kind).green(),
            raw.precision,
            style(backend_impl.name()).yellow()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Running phase estimation...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = engine.estimate(backend_impl.as_ref(), &raw).await;
    spinner.finish_and_clear();
    let result = result?;

    if json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
        println!("{json}");
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Rows shown in the outcome table.
const TOP_OUTCOMES: usize = 16;

/// Print an estimate in table form.
pub fn print_result(result: &PhaseEstimationResult) {
    println!(
        "\n{} Estimated phase: {} (register value {} of {} bits)",
        style("✓").green().bold(),
        style(result.estimated_phase).cyan().bold(),
        result.measured_value,
        result.precision_bits
    );
    println!("  True phase:  {}", result.true_phase);
    println!("  Phase error: {:.6}", result.phase_error);
    println!(
        "  Confidence:  {:.2}% of {} shots",
        result.confidence * 100.0,
        result.measurements
    );
    println!(
        "  Circuit:     {} qubits, depth {}",
        result.meta.num_qubits, result.meta.circuit_depth
    );

    let Some(histogram) = outcome_histogram(result) else {
        return;
    };

    println!("\n  Outcomes:");
    let width = result.precision_bits as usize;
    for outcome in ranked_outcomes(&histogram) {
        let prob = outcome.probability * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {} (phase {:.6}): {:>6} ({:>5.2}%) {}",
            style(format!("{:0width$b}", outcome.value)).cyan(),
            outcome.phase,
            histogram.get(outcome.value),
            prob,
            style(bar).green()
        );
    }

    if histogram.len() > TOP_OUTCOMES {
        println!("  ... and {} more outcomes", histogram.len() - TOP_OUTCOMES);
    }
}

fn outcome_histogram(result: &PhaseEstimationResult) -> Option<OutcomeHistogram> {
    let counts = result.histogram.as_ref()?;
    OutcomeHistogram::from_values(
        result.precision_bits,
        counts.iter().map(|(&value, &count)| (value, count)),
    )
    .ok()
}

fn ranked_outcomes(histogram: &OutcomeHistogram) -> Vec<Outcome> {
    top_outcomes(histogram, TOP_OUTCOMES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_core::ResultMeta;
    use std::collections::BTreeMap;

    fn result_with(histogram: Option<BTreeMap<u64, u64>>) -> PhaseEstimationResult {
        PhaseEstimationResult {
            estimated_phase: 0.25,
            confidence: 0.5,
            histogram,
            measured_value: 1,
            precision_bits: 2,
            unitary_kind: "rotation".to_string(),
            true_phase: 0.25,
            phase_error: 0.0,
            measurements: 8,
            meta: ResultMeta {
                algorithm: "QPE".to_string(),
                backend: "simulator".to_string(),
                num_qubits: 3,
                circuit_depth: 7,
            },
        }
    }

    #[test]
    fn test_outcome_rows_follow_ranking() {
        let counts = BTreeMap::from([(3, 2), (1, 4), (2, 2)]);
        let histogram = outcome_histogram(&result_with(Some(counts))).unwrap();
        let rows = ranked_outcomes(&histogram);

        let values: Vec<_> = rows.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(rows[0].phase, 0.25);
        assert_eq!(rows[0].probability, 0.5);
        assert_eq!(rows[1].probability, 0.25);
    }

    #[test]
    fn test_no_rows_without_histogram() {
        assert!(outcome_histogram(&result_with(None)).is_none());
    }
}
