//! High-level circuit builder API.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId, Register};

/// A quantum circuit.
///
/// Instructions are kept in program order. Qubits and classical bits are
/// allocated through named registers; every operand is checked against the
/// allocation when an instruction is applied, so a built circuit never
/// references a wire it does not own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Quantum registers in allocation order.
    qregs: Vec<Register>,
    /// Classical registers in allocation order.
    cregs: Vec<Register>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
    /// Counter for generating qubit IDs.
    #[serde(rename = "num_qubits")]
    next_qubit_id: u32,
    /// Counter for generating classical bit IDs.
    #[serde(rename = "num_clbits")]
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Add a quantum register with `size` qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Register> {
        let name = name.into();
        if self.qreg(&name).is_some() {
            return Err(IrError::DuplicateRegister(name));
        }
        let reg = Register::new(name, self.next_qubit_id, size);
        self.next_qubit_id += size;
        self.qregs.push(reg.clone());
        Ok(reg)
    }

    /// Add a classical register with `size` bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Register> {
        let name = name.into();
        if self.creg(&name).is_some() {
            return Err(IrError::DuplicateRegister(name));
        }
        let reg = Register::new(name, self.next_clbit_id, size);
        self.next_clbit_id += size;
        self.cregs.push(reg.clone());
        Ok(reg)
    }

    /// Apply an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append the inverse of `fragment`: each instruction inverted, in
    /// reverse order.
    pub fn append_inverse(&mut self, fragment: &[Instruction]) -> IrResult<&mut Self> {
        for inst in fragment.iter().rev() {
            let inverse = inst
                .inverse()
                .ok_or_else(|| IrError::NonInvertible(inst.name().to_string()))?;
            self.apply(inverse)?;
        }
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
            if let Some(angle) = gate.angle() {
                if !angle.is_finite() {
                    return Err(IrError::NonFiniteAngle {
                        gate_name: gate.name().to_string(),
                        angle,
                    });
                }
            }
        }

        for (i, qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.next_qubit_id {
                return Err(IrError::QubitNotFound {
                    qubit: *qubit,
                    gate_name: gate_name(),
                });
            }
            if instruction.qubits[..i].contains(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: *qubit,
                    gate_name: gate_name(),
                });
            }
        }

        for clbit in &instruction.clbits {
            if clbit.0 >= self.next_clbit_id {
                return Err(IrError::ClbitNotFound {
                    clbit: *clbit,
                    gate_name: gate_name(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, lambda: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(lambda),
            control,
            target,
        ))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure qubits into classical bits, pairwise.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubits, clbits)?)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.next_qubit_id).map(QubitId).collect();
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.next_qubit_id as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.next_clbit_id as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Quantum registers in allocation order.
    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    /// Classical registers in allocation order.
    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    /// Look up a quantum register by name.
    pub fn qreg(&self, name: &str) -> Option<&Register> {
        self.qregs.iter().find(|r| r.name == name)
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&Register> {
        self.cregs.iter().find(|r| r.name == name)
    }

    /// Get the circuit depth.
    ///
    /// Barriers align their qubits but do not add a layer.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits()];
        for inst in &self.instructions {
            let wires: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
            let current = wires.iter().map(|&w| levels[w]).max().unwrap_or(0);
            let next = if inst.is_barrier() { current } else { current + 1 };
            for w in wires {
                levels[w] = next;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }

    /// Count instructions by name, barriers excluded.
    pub fn count_ops(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions.iter().filter(|i| !i.is_barrier()) {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }
}
