//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Rotation angles are concrete radians. The set covers what phase
/// estimation circuits need: eigenstate preparation, the Hadamard layer,
/// controlled rotations for the power ladder and the Fourier transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit gates
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Phase gate P(λ) = diag(1, e^{iλ}).
    P(f64),

    // Two-qubit gates
    /// Controlled phase gate.
    CP(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::P(_) => "p",
            StandardGate::CP(_) => "cp",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H | StandardGate::P(_) => 1,

            StandardGate::CP(_) | StandardGate::CRy(_) | StandardGate::CRz(_) | StandardGate::Swap => {
                2
            }
        }
    }

    /// Rotation angle of this gate, if it has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::P(a)
            | StandardGate::CP(a)
            | StandardGate::CRy(a)
            | StandardGate::CRz(a) => Some(*a),
            _ => None,
        }
    }

    /// Compute the inverse (adjoint) of this gate.
    ///
    /// Self-inverse gates map to themselves and rotations negate their
    /// angle.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::X => StandardGate::X,
            StandardGate::H => StandardGate::H,
            StandardGate::Swap => StandardGate::Swap,
            StandardGate::P(a) => StandardGate::P(-a),
            StandardGate::CP(a) => StandardGate::CP(-a),
            StandardGate::CRy(a) => StandardGate::CRy(-a),
            StandardGate::CRz(a) => StandardGate::CRz(-a),
        }
    }
}
