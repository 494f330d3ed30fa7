//! QPE Circuit Representation
//!
//! This crate provides the circuit data structures the phase estimation
//! engine builds and hands to a backend. It is intentionally small: a
//! program-ordered instruction list over named registers, with a gate set
//! limited to what phase estimation circuits use.
//!
//! # Core Components
//!
//! - **Identifiers and registers**: [`QubitId`], [`ClbitId`], [`Register`]
//! - **Gates**: [`StandardGate`] with concrete rotation angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with operand validation
//!
//! # Example: One-bit phase kickback
//!
//! ```rust
//! use qpe_ir::{Circuit, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut circuit = Circuit::new("kickback");
//! let counting = circuit.add_qreg("counting", 1).unwrap();
//! let target = circuit.add_qreg("eigenstate", 1).unwrap();
//! let creg = circuit.add_creg("c", 1).unwrap();
//!
//! circuit.x(QubitId(target.start)).unwrap();
//! circuit.h(QubitId(counting.start)).unwrap();
//! circuit.cp(PI, QubitId(counting.start), QubitId(target.start)).unwrap();
//! circuit.h(QubitId(counting.start)).unwrap();
//! circuit.measure(counting.qubits(), creg.clbits()).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 4);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `H` | 1 | Hadamard |
//! | `P` | 1 | Phase gate |
//! | `CP` | 2 | Controlled phase |
//! | `CRy`, `CRz` | 2 | Controlled rotations |
//! | `Swap` | 2 | SWAP |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId, Register};
