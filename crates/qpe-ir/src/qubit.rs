//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A named, contiguous block of qubits or classical bits.
///
/// Registers never overlap: a circuit hands out ids sequentially, so a
/// register is fully described by its first id and its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Register name, e.g. `counting`.
    pub name: String,
    /// First id in the register.
    pub start: u32,
    /// Number of bits in the register.
    pub size: u32,
}

impl Register {
    /// Create a register spanning `start..start + size`.
    pub fn new(name: impl Into<String>, start: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            start,
            size,
        }
    }

    /// Raw id range covered by this register.
    pub fn range(&self) -> Range<u32> {
        self.start..self.start + self.size
    }

    /// Whether the raw id belongs to this register.
    pub fn contains(&self, id: u32) -> bool {
        self.range().contains(&id)
    }

    /// Qubit ids of this register, lowest index first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        self.range().map(QubitId)
    }

    /// Classical bit ids of this register, lowest index first.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + use<> {
        self.range().map(ClbitId)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}
