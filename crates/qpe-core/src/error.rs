//! Error types for the phase estimation engine.

use thiserror::Error;

use qpe_hal::HalError;
use qpe_ir::IrError;

/// A parameter bundle was rejected before any circuit was built.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The unitary tag is not registered in the catalog.
    #[error("unitaryKind: unknown unitary '{kind}' (known: {})", known.join(", "))]
    UnknownUnitary {
        /// The rejected tag, as supplied.
        kind: String,
        /// Tags the catalog accepts.
        known: Vec<String>,
    },

    /// The angle is not a finite value in [0, 1).
    #[error("angle: must lie in [0, 1), got {angle}")]
    AngleRange {
        /// The rejected angle.
        angle: f64,
    },

    /// The precision is outside 1..=max.
    #[error("precision: must lie in 1..={max}, got {precision}")]
    PrecisionRange {
        /// The rejected precision.
        precision: i64,
        /// The configured ceiling.
        max: u32,
    },

    /// The shot count is not a positive 32-bit integer.
    #[error("measurements: must lie in 1..={}, got {measurements}", u32::MAX)]
    ShotCount {
        /// The rejected shot count.
        measurements: i64,
    },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnknownUnitary { .. } => "unitaryKind",
            Self::AngleRange { .. } => "angle",
            Self::PrecisionRange { .. } => "precision",
            Self::ShotCount { .. } => "measurements",
        }
    }
}

/// Running the circuit or reading its outcomes failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// The backend rejected or failed the run.
    #[error("backend error: {0}")]
    Backend(#[from] HalError),

    /// The circuit could not be assembled.
    #[error("malformed circuit: {0}")]
    MalformedCircuit(#[from] IrError),

    /// A returned key is not a binary string.
    #[error("backend returned non-binary outcome '{bitstring}'")]
    InvalidBitstring {
        /// The offending key.
        bitstring: String,
    },

    /// A returned bitstring does not cover exactly the counting register.
    #[error("outcome '{bitstring}' has {actual} bits, expected {expected}")]
    WidthMismatch {
        /// The offending key.
        bitstring: String,
        /// Counting register width.
        expected: u32,
        /// Width actually returned.
        actual: usize,
    },

    /// A register value does not fit the counting register.
    #[error("outcome {value} does not fit in {precision} bits")]
    ValueOutOfRange {
        /// The offending value.
        value: u64,
        /// Counting register width.
        precision: u32,
    },

    /// The counts do not add up to the requested shots.
    #[error("expected {expected} shots, backend reported {actual}")]
    ShotMismatch {
        /// Shots requested.
        expected: u64,
        /// Shots accounted for in the result.
        actual: u64,
    },

    /// The backend returned no outcomes at all.
    #[error("backend returned no outcomes")]
    EmptyHistogram,
}

/// Errors returned by the engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QpeError {
    /// Parameters were rejected.
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Execution or readout failed.
    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),
}

impl From<HalError> for QpeError {
    fn from(err: HalError) -> Self {
        Self::Execution(err.into())
    }
}

impl From<IrError> for QpeError {
    fn from(err: IrError) -> Self {
        Self::Execution(err.into())
    }
}

/// Result type for engine operations.
pub type QpeResult<T> = Result<T, QpeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::PrecisionRange {
            precision: 0,
            max: 16,
        };
        assert_eq!(err.field(), "precision");
        assert_eq!(err.to_string(), "precision: must lie in 1..=16, got 0");

        let err = ValidationError::UnknownUnitary {
            kind: "nonexistent".into(),
            known: vec!["rotation".into(), "z".into()],
        };
        assert!(err.to_string().contains("known: rotation, z"));
    }

    #[test]
    fn test_hal_error_lifts_into_execution() {
        let err: QpeError = HalError::Backend("boom".into()).into();
        assert!(matches!(
            err,
            QpeError::Execution(ExecutionError::Backend(HalError::Backend(_)))
        ));
    }
}
