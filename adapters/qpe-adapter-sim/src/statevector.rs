//! Statevector simulation engine.

use num_complex::Complex64;

use qpe_ir::{Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis index bit `q` holds the value of qubit `q` (little-endian).
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; sampling
    /// happens once the whole unitary part has been applied.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::P(theta) => self.apply_phase(qubits[0], *theta),
            StandardGate::CP(theta) => self.apply_cp(qubits[0], qubits[1], *theta),
            StandardGate::CRy(theta) => self.apply_cry(qubits[0], qubits[1], *theta),
            StandardGate::CRz(theta) => self.apply_crz(qubits[0], qubits[1], *theta),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    /// Ry on `target`, conditioned on `control` being |1⟩.
    fn apply_cry(&mut self, control: usize, target: usize, theta: f64) {
        let mask = 1 << target;
        let ctrl_mask = 1 << control;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    /// Rz on `target`, conditioned on `control` being |1⟩.
    fn apply_crz(&mut self, control: usize, target: usize, theta: f64) {
        let mask = 1 << target;
        let ctrl_mask = 1 << control;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & ctrl_mask == ctrl_mask {
                if i & mask == 0 {
                    self.amplitudes[i] *= phase_0;
                } else {
                    self.amplitudes[i] *= phase_1;
                }
            }
        }
    }

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let both = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & both == both {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            if i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::QubitId;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn gate(g: StandardGate, qubits: &[u32]) -> Instruction {
        Instruction::gate(g, qubits.iter().map(|&q| QubitId(q)))
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(&gate(StandardGate::H, &[0]));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_x_then_swap_moves_excitation() {
        let mut sv = Statevector::new(2);
        sv.apply(&gate(StandardGate::X, &[0]));
        sv.apply(&gate(StandardGate::Swap, &[0, 1]));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_phase_kickback_flips_control() {
        // |1⟩ is a P(π) eigenstate with eigenvalue -1, so H·CP(π)·H maps
        // the control from |0⟩ to |1⟩.
        let mut sv = Statevector::new(2);
        sv.apply(&gate(StandardGate::X, &[1]));
        sv.apply(&gate(StandardGate::H, &[0]));
        sv.apply(&gate(StandardGate::CP(PI), &[0, 1]));
        sv.apply(&gate(StandardGate::H, &[0]));
        let probs = sv.probabilities();
        assert!((probs[3] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crz_kickback_matches_cp_on_excited_target() {
        // On |1⟩, CRz(2λ) and CP(λ) produce the same relative phase.
        let mut a = Statevector::new(2);
        let mut b = Statevector::new(2);
        for sv in [&mut a, &mut b] {
            sv.apply(&gate(StandardGate::X, &[1]));
            sv.apply(&gate(StandardGate::H, &[0]));
        }
        a.apply(&gate(StandardGate::CP(PI / 3.0), &[0, 1]));
        b.apply(&gate(StandardGate::CRz(2.0 * PI / 3.0), &[0, 1]));
        a.apply(&gate(StandardGate::H, &[0]));
        b.apply(&gate(StandardGate::H, &[0]));
        for (pa, pb) in a.probabilities().iter().zip(b.probabilities()) {
            assert!((pa - pb).abs() < 1e-10);
        }
    }

    #[test]
    fn test_controlled_ry_respects_control() {
        let mut sv = Statevector::new(2);
        sv.apply(&gate(StandardGate::CRy(PI), &[0, 1]));
        // Control is |0⟩: nothing happens.
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));

        sv.apply(&gate(StandardGate::X, &[0]));
        sv.apply(&gate(StandardGate::CRy(PI), &[0, 1]));
        // Ry(π)|0⟩ = |1⟩ on the target.
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_minus_i_preparation() {
        // P(-π/2)·H|0⟩ = (|0⟩ - i|1⟩)/√2.
        let mut sv = Statevector::new(1);
        sv.apply(&gate(StandardGate::H, &[0]));
        sv.apply(&gate(StandardGate::P(-PI / 2.0), &[0]));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, -sqrt2_inv)));
    }

    #[test]
    fn test_measure_and_barrier_are_noops() {
        let mut sv = Statevector::new(1);
        sv.apply(&gate(StandardGate::H, &[0]));
        let before = sv.probabilities();
        sv.apply(&Instruction::barrier([QubitId(0)]));
        sv.apply(&Instruction::measure([QubitId(0)], [qpe_ir::ClbitId(0)]).unwrap());
        assert_eq!(before, sv.probabilities());
    }
}
