//! The value returned to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use qpe_ir::Circuit;

use crate::estimator::{self, PhaseEstimate};
use crate::execution::OutcomeHistogram;
use crate::params::ExperimentParameters;

/// Outcome of one phase estimation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEstimationResult {
    /// Estimated phase in [0, 1).
    pub estimated_phase: f64,
    /// Fraction of shots supporting the estimate.
    pub confidence: f64,
    /// Counts per register value, when diagnostics are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<BTreeMap<u64, u64>>,
    /// Register value the estimate was read from.
    pub measured_value: u64,
    /// Counting register width.
    pub precision_bits: u32,
    /// Canonical unitary tag.
    pub unitary_kind: String,
    /// The requested angle.
    pub true_phase: f64,
    /// Circular distance between estimate and requested angle.
    pub phase_error: f64,
    /// Shots executed.
    pub measurements: u32,
    /// Run metadata.
    pub meta: ResultMeta,
}

/// Where and how the estimate was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMeta {
    /// Always `"QPE"`.
    pub algorithm: String,
    /// Name of the backend that ran the circuit.
    pub backend: String,
    /// Total qubits in the circuit.
    pub num_qubits: usize,
    /// Circuit depth.
    pub circuit_depth: usize,
}

/// Package an estimate with the request and run statistics.
pub fn assemble(
    params: &ExperimentParameters,
    estimate: PhaseEstimate,
    histogram: &OutcomeHistogram,
    circuit: &Circuit,
    backend: &str,
    include_histogram: bool,
) -> PhaseEstimationResult {
    PhaseEstimationResult {
        estimated_phase: estimate.phase,
        confidence: estimate.confidence,
        histogram: include_histogram.then(|| histogram.as_map().clone()),
        measured_value: estimate.measured_value,
        precision_bits: params.precision(),
        unitary_kind: params.unitary_kind().to_string(),
        true_phase: params.angle(),
        phase_error: estimator::phase_error(estimate.phase, params.angle()),
        measurements: params.measurements(),
        meta: ResultMeta {
            algorithm: "QPE".to_string(),
            backend: backend.to_string(),
            num_qubits: circuit.num_qubits(),
            circuit_depth: circuit.depth(),
        },
    }
}
