//! Request orchestration.

use tracing::{debug, info, instrument};

use qpe_hal::Backend;
use qpe_ir::Circuit;

use crate::builder;
use crate::catalog::UnitaryCatalog;
use crate::config::{ConfigError, EngineConfig};
use crate::error::QpeResult;
use crate::estimator;
use crate::execution;
use crate::params::{self, ExperimentParameters, RawParameters};
use crate::result::{self, PhaseEstimationResult};

/// The phase estimation engine.
///
/// Read-only after construction; one engine can serve concurrent requests
/// against any number of backends.
#[derive(Debug, Clone, Default)]
pub struct QpeEngine {
    config: EngineConfig,
    catalog: UnitaryCatalog,
}

impl QpeEngine {
    /// An engine with the built-in catalog.
    ///
    /// Fails if `config` is out of range.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog: UnitaryCatalog::builtin(),
        })
    }

    /// Replace the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: UnitaryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active catalog.
    pub fn catalog(&self) -> &UnitaryCatalog {
        &self.catalog
    }

    /// Validate a raw request.
    pub fn validate(&self, raw: &RawParameters) -> QpeResult<ExperimentParameters> {
        Ok(params::validate(raw, &self.catalog, &self.config)?)
    }

    /// Build the circuit for already validated parameters.
    pub fn build(&self, params: &ExperimentParameters) -> QpeResult<Circuit> {
        let entry = self.catalog.get(params.unitary_kind());
        Ok(builder::build_circuit(params, entry)?)
    }

    /// Validate `raw`, run the circuit once on `backend` and read out the
    /// phase.
    #[instrument(skip(self, backend, raw), fields(backend = backend.name()))]
    pub async fn estimate(
        &self,
        backend: &dyn Backend,
        raw: &RawParameters,
    ) -> QpeResult<PhaseEstimationResult> {
        let params = self.validate(raw)?;
        debug!(
            angle = params.angle(),
            unitary = params.unitary_kind(),
            precision = params.precision(),
            measurements = params.measurements(),
            "parameters accepted"
        );

        let circuit = self.build(&params)?;
        let histogram =
            execution::execute(backend, &circuit, params.precision(), params.measurements())
                .await?;
        let estimate = estimator::estimate_phase(&histogram)?;
        debug!(
            top = ?estimator::top_outcomes(&histogram, 3),
            "leading outcomes"
        );

        let result = result::assemble(
            &params,
            estimate,
            &histogram,
            &circuit,
            backend.name(),
            self.config.include_histogram,
        );
        info!(
            phase = result.estimated_phase,
            confidence = result.confidence,
            error = result.phase_error,
            "phase estimation completed"
        );
        Ok(result)
    }
}

/// Run one request with the default engine.
pub async fn estimate(
    backend: &dyn Backend,
    raw: &RawParameters,
) -> QpeResult<PhaseEstimationResult> {
    QpeEngine::default().estimate(backend, raw).await
}
