//! Experiment parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::catalog::UnitaryCatalog;
use crate::config::{EngineConfig, MAX_PRECISION};
use crate::error::ValidationError;

/// An unvalidated request, as it arrives from a caller or a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameters {
    /// Target phase as a fraction of a full turn.
    pub angle: f64,
    /// Catalog tag.
    #[serde(default = "default_unitary", alias = "unitary_kind", alias = "unitary")]
    pub unitary_kind: String,
    /// Number of counting qubits.
    #[serde(default = "default_precision")]
    pub precision: i64,
    /// Number of shots; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<i64>,
}

fn default_unitary() -> String {
    "rotation".to_string()
}

fn default_precision() -> i64 {
    4
}

impl RawParameters {
    /// A request without an explicit shot count.
    pub fn new(angle: f64, unitary_kind: impl Into<String>, precision: i64) -> Self {
        Self {
            angle,
            unitary_kind: unitary_kind.into(),
            precision,
            measurements: None,
        }
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_measurements(mut self, measurements: i64) -> Self {
        self.measurements = Some(measurements);
        self
    }
}

/// A validated request. Only [`validate`] creates one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentParameters {
    angle: f64,
    unitary_kind: String,
    precision: u32,
    measurements: u32,
}

impl ExperimentParameters {
    /// Target phase in [0, 1).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Canonical catalog tag.
    pub fn unitary_kind(&self) -> &str {
        &self.unitary_kind
    }

    /// Counting register width.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Shot count.
    pub fn measurements(&self) -> u32 {
        self.measurements
    }
}

/// Check `raw` against the catalog and configured limits.
///
/// Checks run in a fixed order (unitary, angle, precision, measurements)
/// and the first violation is returned.
pub fn validate(
    raw: &RawParameters,
    catalog: &UnitaryCatalog,
    config: &EngineConfig,
) -> Result<ExperimentParameters, ValidationError> {
    let unitary_kind = catalog
        .resolve(&raw.unitary_kind)
        .ok_or_else(|| ValidationError::UnknownUnitary {
            kind: raw.unitary_kind.clone(),
            known: catalog.tags(),
        })?
        .to_string();

    if !(0.0..1.0).contains(&raw.angle) {
        return Err(ValidationError::AngleRange { angle: raw.angle });
    }

    let max = config.max_precision.min(MAX_PRECISION);
    let precision = u32::try_from(raw.precision)
        .ok()
        .filter(|p| (1..=max).contains(p))
        .ok_or(ValidationError::PrecisionRange {
            precision: raw.precision,
            max,
        })?;

    let requested = raw
        .measurements
        .unwrap_or_else(|| i64::from(config.default_measurements));
    let measurements = u32::try_from(requested)
        .ok()
        .filter(|&m| m > 0)
        .ok_or(ValidationError::ShotCount {
            measurements: requested,
        })?;

    Ok(ExperimentParameters {
        angle: raw.angle,
        unitary_kind,
        precision,
        measurements,
    })
}
