//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use qpe_adapter_sim::SimulatorBackend;
use qpe_core::{EngineConfig, QpeEngine, RawParameters};
use qpe_hal::{Backend, BackendConfig, BackendRegistry};

/// Arguments describing one estimation request.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Target phase as a fraction of a full turn, in [0, 1)
    #[arg(short, long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Unitary family (see `qpe unitaries`)
    #[arg(short, long, default_value = "rotation")]
    pub unitary: String,

    /// Number of counting qubits
    #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
    pub precision: i64,

    /// Number of shots (engine default if omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub shots: Option<i64>,

    /// Read the request from a JSON or YAML file instead
    #[arg(long, conflicts_with = "angle")]
    pub params: Option<PathBuf>,
}

impl RequestArgs {
    /// Turn the arguments into a raw request.
    pub fn to_raw(&self) -> Result<RawParameters> {
        if let Some(path) = &self.params {
            return load_params(path);
        }
        let angle = self
            .angle
            .context("either --angle or --params is required")?;
        let mut raw = RawParameters::new(angle, self.unitary.as_str(), self.precision);
        raw.measurements = self.shots;
        Ok(raw)
    }
}

/// Load a raw request from a JSON (`.json`) or YAML file.
pub fn load_params(path: &Path) -> Result<RawParameters> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    };
    Ok(raw)
}

/// Build the engine from an optional config file and the environment.
pub fn create_engine(config: Option<&Path>) -> Result<QpeEngine> {
    let config = EngineConfig::load(config).context("Failed to load engine configuration")?;
    Ok(QpeEngine::new(config)?)
}

/// Registry of backends the CLI can run on.
pub fn backend_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<SimulatorBackend>("simulator");
    registry.register_alias("sim", "simulator");
    registry
}

/// Create a backend by name, applying `seed` when given.
pub fn create_backend(name: &str, seed: Option<u64>) -> Result<Box<dyn Backend>> {
    debug!(backend = name, seeded = seed.is_some(), "creating backend");
    let mut config = BackendConfig::new(name);
    if let Some(seed) = seed {
        config = config.with_extra("seed", serde_json::json!(seed));
    }
    Ok(backend_registry().create(&name.to_lowercase(), config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend_by_alias() {
        let backend = create_backend("SIM", Some(1)).unwrap();
        assert_eq!(backend.name(), "simulator");
        assert!(backend.capabilities().features.contains(&"seeded".to_string()));
        assert!(create_backend("nonexistent", None).is_err());
    }

    #[test]
    fn test_request_requires_angle() {
        let args = RequestArgs {
            angle: None,
            unitary: "rotation".into(),
            precision: 4,
            shots: None,
            params: None,
        };
        assert!(args.to_raw().is_err());

        let raw = RequestArgs {
            angle: Some(0.5),
            shots: Some(10),
            ..args
        }
        .to_raw()
        .unwrap();
        assert_eq!(raw, RawParameters::new(0.5, "rotation", 4).with_measurements(10));
    }
}
