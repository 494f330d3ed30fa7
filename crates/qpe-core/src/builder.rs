//! Phase estimation circuit construction.
//!
//! Layout for precision n and an eigenstate register of width m:
//!
//! ```text
//! counting[0..n]   ─H─●──────────────── ... ─┤ QFT† ├─M─
//!                     │        │
//! eigenstate[0..m] ─P─U^1────U^2─────── ... ───────────
//! ```
//!
//! Counting qubit k controls U^(2^k) and carries weight 2^k in the measured
//! value, so classical bit k is the k-th least significant bit of the
//! register value.

use tracing::debug;

use qpe_ir::{Circuit, ClbitId, Instruction, IrResult, QubitId, StandardGate};

use crate::catalog::ControlledPowerGate;
use crate::params::ExperimentParameters;

/// Name of the counting register.
pub const COUNTING_REGISTER: &str = "counting";
/// Name of the eigenstate register.
pub const EIGENSTATE_REGISTER: &str = "eigenstate";
/// Name of the classical register holding the readout.
pub const READOUT_REGISTER: &str = "c";

/// Build the full phase estimation circuit for `params` using `entry`.
pub fn build_circuit(
    params: &ExperimentParameters,
    entry: &dyn ControlledPowerGate,
) -> IrResult<Circuit> {
    let n = params.precision();
    let mut circuit = Circuit::new(format!("qpe_{}_{n}", entry.name()));

    let counting: Vec<QubitId> = circuit.add_qreg(COUNTING_REGISTER, n)?.qubits().collect();
    let target: Vec<QubitId> = circuit
        .add_qreg(EIGENSTATE_REGISTER, entry.num_target_qubits())?
        .qubits()
        .collect();
    let readout: Vec<ClbitId> = circuit.add_creg(READOUT_REGISTER, n)?.clbits().collect();

    for inst in entry.prepare_eigenstate(&target) {
        circuit.apply(inst)?;
    }
    for &q in &counting {
        circuit.h(q)?;
    }
    circuit.barrier_all()?;

    for (k, &control) in (0u32..).zip(&counting) {
        for inst in entry.controlled_power(params.angle(), k, control, &target) {
            circuit.apply(inst)?;
        }
    }
    circuit.barrier_all()?;

    circuit.append_inverse(&qft(&counting))?;
    circuit.barrier(counting.iter().copied())?;
    circuit.measure(counting, readout)?;

    debug!(
        name = circuit.name(),
        qubits = circuit.num_qubits(),
        depth = circuit.depth(),
        "built phase estimation circuit"
    );
    Ok(circuit)
}

/// Quantum Fourier transform over `qubits`, `qubits[0]` least significant.
///
/// Maps |x⟩ to Σ_y e^{2πixy/2^n}|y⟩/√(2^n), including the final swaps.
pub fn qft(qubits: &[QubitId]) -> Vec<Instruction> {
    let n = qubits.len();
    let mut gates = vec![];
    for j in (0..n).rev() {
        gates.push(Instruction::single_qubit_gate(StandardGate::H, qubits[j]));
        for k in (0..j).rev() {
            let lambda = std::f64::consts::PI / ((j - k) as f64).exp2();
            gates.push(Instruction::two_qubit_gate(
                StandardGate::CP(lambda),
                qubits[k],
                qubits[j],
            ));
        }
    }
    for i in 0..n / 2 {
        gates.push(Instruction::two_qubit_gate(
            StandardGate::Swap,
            qubits[i],
            qubits[n - 1 - i],
        ));
    }
    gates
}
