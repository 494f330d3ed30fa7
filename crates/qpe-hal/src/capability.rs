//! Backend capability introspection.
//!
//! [`Capabilities`] describe what a backend can run: qubit count, shot
//! limit and the gate names it accepts. The execution adapter checks a
//! circuit against them before submitting it, so a mismatch surfaces as a
//! precise error instead of a backend failure.

use serde::{Deserialize, Serialize};

use qpe_ir::Circuit;

/// Hardware capabilities of a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Supported gate names (lower-case, as returned by `StandardGate::name`).
    pub gate_set: Vec<String>,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`, `"seeded"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots: 1_000_000,
            gate_set: ["x", "h", "p", "cp", "cry", "crz", "swap"]
                .map(String::from)
                .to_vec(),
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Whether the named gate is supported.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.iter().any(|g| g == name)
    }

    /// Check a circuit and shot count against these capabilities.
    ///
    /// Returns the list of violations; empty means the circuit can run.
    pub fn violations(&self, circuit: &Circuit, shots: u32) -> Vec<String> {
        let mut reasons = vec![];
        if circuit.num_qubits() > self.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but backend '{}' supports {}",
                circuit.num_qubits(),
                self.name,
                self.num_qubits
            ));
        }
        if shots > self.max_shots {
            reasons.push(format!(
                "{shots} shots requested but backend '{}' allows {}",
                self.name, self.max_shots
            ));
        }
        for name in circuit.count_ops().keys() {
            if *name != "measure" && !self.supports_gate(name) {
                reasons.push(format!("gate '{name}' is not supported by '{}'", self.name));
            }
        }
        reasons
    }
}
