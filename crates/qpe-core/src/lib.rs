//! Quantum phase estimation engine.
//!
//! Given a target phase θ ∈ [0, 1), a unitary family from the catalog and a
//! counting register width, the engine builds the phase estimation circuit,
//! runs it on a [`Backend`](qpe_hal::Backend) and reads θ back as a binary
//! fraction together with the share of shots that support it.
//!
//! # Pipeline
//!
//! ```text
//! RawParameters ─validate─▶ ExperimentParameters ─build─▶ Circuit
//!        ─execute─▶ OutcomeHistogram ─estimate─▶ PhaseEstimationResult
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qpe_adapter_sim::SimulatorBackend;
//! use qpe_core::{QpeEngine, RawParameters};
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let engine = QpeEngine::default();
//! let raw = RawParameters::new(0.25, "rotation", 4).with_measurements(1000);
//!
//! let result = engine.estimate(&backend, &raw).await?;
//! assert_eq!(result.estimated_phase, 0.25);
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod execution;
pub mod params;
pub mod result;

pub use catalog::{ControlledPowerGate, UnitaryCatalog};
pub use config::{ConfigError, EngineConfig, MAX_PRECISION};
pub use engine::{QpeEngine, estimate};
pub use error::{ExecutionError, QpeError, QpeResult, ValidationError};
pub use estimator::{Outcome, PhaseEstimate};
pub use execution::OutcomeHistogram;
pub use params::{ExperimentParameters, RawParameters};
pub use result::{PhaseEstimationResult, ResultMeta};
